/*
 * Responsibility
 * - v1 URL structure
 * - the /accounts routes sit behind the access middleware; /health does not
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    accounts::{create_account, delete_account, get_account, list_accounts},
    health::health,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let accounts = Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{account_id}",
            get(get_account).delete(delete_account),
        );

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(accounts, state))
}
