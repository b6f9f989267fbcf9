/*
 * Responsibility
 * - take `{account_id}` from the path as a positive integer
 * - non-numeric or non-positive ids are a 400 before any store access
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

pub const INVALID_ACCOUNT_ID: &str = "INVALID_ACCOUNT_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub i64);

fn invalid() -> AppError {
    AppError::bad_request(INVALID_ACCOUNT_ID, "account id must be a positive integer")
}

impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        if id < 1 {
            return Err(invalid());
        }
        Ok(Self(id))
    }
}
