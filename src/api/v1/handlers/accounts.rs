/*
 * Responsibility
 * - /accounts handlers (all behind the access middleware)
 * - owner comes from the verified payload, never from the request body
 * - per-account reads/deletes: load → 404 → ownership check → operate
 * - malformed input is rejected by the extractors (400, AppError envelope)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::accounts::{
            AccountResponse, CreateAccountRequest, DeleteAccountResponse, ListAccountsQuery,
        },
        extractors::{AccountId, ApiJson, ApiQuery, AuthPayload, INVALID_REQUEST},
    },
    error::AppError,
    repos::account_repo::AccountRow,
    services::ownership::authorize_owner,
    state::AppState,
    token::Payload,
};

const RESOURCE: &str = "account";

pub async fn create_account(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ApiJson(req): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let currency = req
        .validate()
        .map_err(|msg| AppError::bad_request(INVALID_REQUEST, msg))?;

    let row = state.accounts.create(payload.identity(), currency).await?;

    tracing::info!(account_id = row.id, owner = %row.owner, "account created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    ApiQuery(query): ApiQuery<ListAccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let (limit, offset) = query
        .validate()
        .map_err(|msg| AppError::bad_request(INVALID_REQUEST, msg))?;

    let rows = state
        .accounts
        .list_by_owner(payload.identity(), limit, offset)
        .await?;

    Ok(Json(rows.into_iter().map(AccountResponse::from).collect()))
}

pub async fn get_account(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    AccountId(account_id): AccountId,
) -> Result<Json<AccountResponse>, AppError> {
    let row = load_owned_account(&state, &payload, account_id).await?;
    Ok(Json(row.into()))
}

pub async fn delete_account(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    AccountId(account_id): AccountId,
) -> Result<Json<DeleteAccountResponse>, AppError> {
    let row = load_owned_account(&state, &payload, account_id).await?;

    if !state.accounts.delete(row.id).await? {
        // Removed between load and delete.
        return Err(AppError::not_found(RESOURCE));
    }

    tracing::info!(account_id = row.id, owner = %row.owner, "account deleted");
    Ok(Json(DeleteAccountResponse { deleted: row.id }))
}

async fn load_owned_account(
    state: &AppState,
    payload: &Payload,
    account_id: i64,
) -> Result<AccountRow, AppError> {
    let row = state
        .accounts
        .get(account_id)
        .await?
        .ok_or(AppError::not_found(RESOURCE))?;

    authorize_owner(payload, &row.owner, RESOURCE)?;
    Ok(row)
}
