use chrono::Duration;

use crate::token::{error::TokenError, payload::Payload};

/// Shortest secret accepted by any maker.
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Creates and verifies access tokens.
///
/// Implementations hold only immutable key material (plus a clock), so a single
/// instance is shared across requests behind an `Arc` without locking.
pub trait TokenMaker: Send + Sync + std::fmt::Debug {
    /// Issue a token for `identity` that stays valid for `duration`.
    fn create_token(
        &self,
        identity: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError>;

    /// Authenticate `token` and check it has not expired.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

pub(crate) fn ensure_key_strength(secret: &[u8]) -> Result<(), TokenError> {
    if secret.len() < MIN_SECRET_KEY_LEN {
        return Err(TokenError::WeakKey {
            min: MIN_SECRET_KEY_LEN,
            actual: secret.len(),
        });
    }
    Ok(())
}
