//! Bearer access-token check → verified `Payload` into request extensions.
//!
//! One pass per request, first failure wins:
//! 1. header missing / empty           → `AuthError::HeaderMissing`
//! 2. fewer than two whitespace fields → `AuthError::InvalidFormat`
//! 3. scheme (lower-cased) mismatch    → `AuthError::UnsupportedScheme`
//! 4. `TokenMaker::verify_token` error → `AuthError::Token`
//! 5. success: `Payload` inserted, next handler runs
//!
//! Every rejection is a 401; the variants are for logs and tests.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, Request, header},
    middleware::{self, Next},
    response::Response,
};
use thiserror::Error;

use crate::error::AppError;
use crate::state::AppState;
use crate::token::{Payload, TokenError, TokenMaker};

pub const AUTHORIZATION_HEADER: HeaderName = header::AUTHORIZATION;
pub const BEARER_SCHEME: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header not provided")]
    HeaderMissing,

    #[error("invalid authorization format")]
    InvalidFormat,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Which header carries the credentials and which scheme is accepted.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    header: HeaderName,
    scheme: String,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::new(AUTHORIZATION_HEADER, BEARER_SCHEME)
    }
}

impl AuthPolicy {
    /// `scheme` is compared case-insensitively.
    pub fn new(header: HeaderName, scheme: &str) -> Self {
        Self {
            header,
            scheme: scheme.to_ascii_lowercase(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Steps 1-3: pull the raw token out of the request headers.
    pub fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, AuthError> {
        let value = match headers.get(&self.header) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(AuthError::HeaderMissing),
        };

        let value = value.to_str().map_err(|_| AuthError::InvalidFormat)?;

        let mut fields = value.split_whitespace();
        let (scheme, token) = match (fields.next(), fields.next()) {
            (Some(scheme), Some(token)) => (scheme, token),
            _ => return Err(AuthError::InvalidFormat),
        };

        let scheme = scheme.to_ascii_lowercase();
        if scheme != self.scheme {
            return Err(AuthError::UnsupportedScheme(scheme));
        }

        Ok(token)
    }

    /// Steps 1-4.
    pub fn authenticate(
        &self,
        maker: &dyn TokenMaker,
        headers: &HeaderMap,
    ) -> Result<Payload, AuthError> {
        let token = self.extract_token(headers)?;
        Ok(maker.verify_token(token)?)
    }
}

/// Put the access check in front of every route of `router`.
///
/// ```ignore
/// let accounts = middleware::auth::access::apply(accounts_routes(), state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths still fall through to 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let payload = match state
        .auth_policy
        .authenticate(state.token_maker.as_ref(), req.headers())
    {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "access token rejected"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(identity = %payload.identity(), token_id = %payload.id(), "authenticated");

    // middleware → extractor
    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;

    use crate::token::JwtMaker;

    const SECRET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCD";

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn missing_or_empty_header() {
        let policy = AuthPolicy::default();
        assert_eq!(
            policy.extract_token(&HeaderMap::new()),
            Err(AuthError::HeaderMissing)
        );
        assert_eq!(policy.extract_token(&headers("")), Err(AuthError::HeaderMissing));
    }

    #[test]
    fn single_field_is_invalid_format() {
        let policy = AuthPolicy::default();
        assert_eq!(
            policy.extract_token(&headers("bearer")),
            Err(AuthError::InvalidFormat)
        );
        assert_eq!(
            policy.extract_token(&headers("   ")),
            Err(AuthError::InvalidFormat)
        );
    }

    #[test]
    fn unsupported_scheme_is_reported_lower_cased() {
        let policy = AuthPolicy::default();
        let err = policy.extract_token(&headers("OAuth xyz")).unwrap_err();
        assert_eq!(err, AuthError::UnsupportedScheme("oauth".into()));
        assert_eq!(err.to_string(), "unsupported authorization type oauth");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let policy = AuthPolicy::default();
        assert_eq!(policy.extract_token(&headers("Bearer abc")), Ok("abc"));
        assert_eq!(policy.extract_token(&headers("BEARER   abc")), Ok("abc"));
        assert_eq!(policy.extract_token(&headers("bearer abc extra")), Ok("abc"));
    }

    #[test]
    fn custom_header_and_scheme() {
        let policy = AuthPolicy::new(HeaderName::from_static("x-api-token"), "Token");
        let mut h = HeaderMap::new();
        h.insert("x-api-token", HeaderValue::from_static("token abc"));

        assert_eq!(policy.scheme(), "token");
        assert_eq!(policy.extract_token(&h), Ok("abc"));
        assert_eq!(
            policy.extract_token(&headers("token abc")),
            Err(AuthError::HeaderMissing)
        );
    }

    #[test]
    fn authenticate_surfaces_token_errors() {
        let maker = JwtMaker::new(SECRET).unwrap();
        let policy = AuthPolicy::default();

        let (token, issued) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        let payload = policy
            .authenticate(&maker, &headers(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(payload, issued);

        let (expired, _) = maker.create_token("alice", -Duration::minutes(1)).unwrap();
        assert_eq!(
            policy.authenticate(&maker, &headers(&format!("Bearer {expired}"))),
            Err(AuthError::Token(TokenError::Expired))
        );

        assert_eq!(
            policy.authenticate(&maker, &headers("Bearer not-a-token")),
            Err(AuthError::Token(TokenError::Malformed))
        );
    }
}
