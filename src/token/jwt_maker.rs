use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use tracing::{debug, error};

use crate::token::{
    clock::{Clock, SystemClock},
    error::TokenError,
    maker::{TokenMaker, ensure_key_strength},
    payload::Payload,
};

/// Only algorithm this maker signs with or accepts.
const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Signed (not encrypted) tokens: HS512 JWT over the JSON payload.
///
/// - Verification is pinned to HS512. A token whose header names any other
///   algorithm (HS256, RS256, ES256, ...) is rejected before the signature is used.
/// - Expiration is checked through `Payload::valid_at` with the injected clock,
///   so jsonwebtoken's own `exp` handling is disabled.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtMaker")
            .field("algorithm", &JWT_ALGORITHM)
            .finish()
    }
}

impl JwtMaker {
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        Self::with_clock(secret_key, Arc::new(SystemClock))
    }

    pub fn with_clock(secret_key: &str, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        ensure_key_strength(secret_key.as_bytes())?;

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
            clock,
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        identity: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new_at(identity, duration, self.clock.now())?;

        let mut header = Header::new(JWT_ALGORITHM);
        header.typ = Some("JWT".to_string());

        let token = jsonwebtoken::encode(&header, &payload, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Encoding(e.to_string())
        })?;

        debug!(token_id = %payload.id(), expires_at = %payload.expires_at(), "issued JWT");
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = jsonwebtoken::decode::<Payload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_jwt_error(&e))?;

        let payload = data.claims;
        payload.valid_at(self.clock.now())?;
        Ok(payload)
    }
}

fn map_jwt_error(e: &jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        // Wrong key, tampered content, or a header naming an algorithm other than ours.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}
