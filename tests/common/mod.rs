#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use chrono::Duration;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bank_api::app::build_router;
use bank_api::middleware::auth::AuthPolicy;
use bank_api::middleware::http::HttpLimits;
use bank_api::repos::account_repo::{
    AccountRow, AccountStore, Currency, InMemoryAccountStore, RepoResult,
};
use bank_api::repos::error::RepoError;
use bank_api::state::AppState;
use bank_api::token::{SystemClock, TokenMaker, TokenMakerKind, build_token_maker};

pub const SECRET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCD";

pub const BOTH_MAKERS: [TokenMakerKind; 2] =
    [TokenMakerKind::Symmetric, TokenMakerKind::Signature];

pub fn maker(kind: TokenMakerKind) -> Arc<dyn TokenMaker> {
    build_token_maker(kind, SECRET, Arc::new(SystemClock)).unwrap()
}

pub fn state_with(kind: TokenMakerKind, accounts: Arc<dyn AccountStore>) -> AppState {
    AppState::new(maker(kind), AuthPolicy::default(), accounts)
}

pub fn test_state(kind: TokenMakerKind) -> AppState {
    state_with(kind, Arc::new(InMemoryAccountStore::new()))
}

/// Full application router (same layers as production).
pub fn build_test_app(state: AppState) -> Router {
    build_router(state, HttpLimits::default())
}

/// `"<scheme> <token>"` for a fresh token.
pub fn auth_header(state: &AppState, scheme: &str, identity: &str, duration: Duration) -> String {
    let (token, _) = state.token_maker.create_token(identity, duration).unwrap();
    format!("{scheme} {token}")
}

pub fn bearer(state: &AppState, identity: &str) -> String {
    auth_header(state, "bearer", identity, Duration::minutes(1))
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose every call fails, for 500 paths.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl AccountStore for FailingStore {
    async fn create(&self, _owner: &str, _currency: Currency) -> RepoResult<AccountRow> {
        Err(RepoError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _id: i64) -> RepoResult<Option<AccountRow>> {
        Err(RepoError::Unavailable("connection refused".into()))
    }

    async fn list_by_owner(
        &self,
        _owner: &str,
        _limit: usize,
        _offset: usize,
    ) -> RepoResult<Vec<AccountRow>> {
        Err(RepoError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _id: i64) -> RepoResult<bool> {
        Err(RepoError::Unavailable("connection refused".into()))
    }
}
