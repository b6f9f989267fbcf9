/*!
 * Authenticated payload extractor
 *
 * Responsibility:
 * - hand the `Payload` verified by the access middleware to handlers
 *   as a typed argument (no string-keyed context lookup)
 */

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::token::Payload;

/// Handler argument carrying the verified access-token payload.
///
/// The access middleware inserts the `Payload` into request extensions; if it is
/// missing the route was wired without the middleware, which is a server error.
#[derive(Debug, Clone)]
pub struct AuthPayload(pub Payload);

impl<S> FromRequestParts<S> for AuthPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Payload>() {
            Some(payload) => Ok(AuthPayload(payload.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "auth payload missing: route not behind access middleware"
                );
                Err(AppError::Internal)
            }
        }
    }
}
