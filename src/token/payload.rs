use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::token::error::{PayloadError, TokenError};

/// Claims carried inside every access token.
///
/// - `id` is random (UUID v4) so a token can later be revoked individually.
/// - Fields are private: a payload is never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    id: Uuid,
    identity: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Payload {
    /// Build a payload stamped with the current wall-clock time.
    pub fn new(identity: &str, duration: Duration) -> Result<Self, PayloadError> {
        Self::new_at(identity, duration, Utc::now())
    }

    /// Build a payload issued at `now`.
    ///
    /// A negative `duration` yields a payload that is already expired.
    /// An expiry past the representable range is `DurationOutOfRange`.
    pub fn new_at(
        identity: &str,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, PayloadError> {
        if identity.trim().is_empty() {
            return Err(PayloadError::InvalidIdentity);
        }

        let expires_at = now
            .checked_add_signed(duration)
            .ok_or(PayloadError::DurationOutOfRange)?;

        Ok(Self {
            id: random_token_id()?,
            identity: identity.to_string(),
            issued_at: now,
            expires_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expiration check against the wall clock.
    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }

    /// Expiration check shared by every maker.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expires_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}

fn random_token_id() -> Result<Uuid, PayloadError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes).map_err(|e| PayloadError::IdGeneration(e.to_string()))?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
