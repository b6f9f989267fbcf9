use thiserror::Error;

/// Errors raised while building a fresh `Payload`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("identity must not be empty")]
    InvalidIdentity,

    #[error("failed to generate token id: {0}")]
    IdGeneration(String),

    #[error("token duration is out of range")]
    DurationOutOfRange,
}

/// Errors returned by `TokenMaker` construction, issuance and verification.
///
/// Every verification failure is terminal for the request; the variants only
/// exist so callers (and tests) can tell the reasons apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("cannot create payload: {0}")]
    PayloadCreation(#[from] PayloadError),

    #[error("secret key must be at least {min} bytes, got {actual}")]
    WeakKey { min: usize, actual: usize },

    #[error("cannot encode token: {0}")]
    Encoding(String),

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}
