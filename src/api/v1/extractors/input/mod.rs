/*
 * Responsibility
 * - JSON body / query string extractors whose rejections use the AppError envelope
 * - axum's own rejection text becomes the message
 */
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// `axum::Json` with a 400 `INVALID_REQUEST` rejection.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(INVALID_REQUEST, rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `axum::extract::Query` with a 400 `INVALID_REQUEST` rejection.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(INVALID_REQUEST, rejection.body_text()))?;
        Ok(Self(value))
    }
}
