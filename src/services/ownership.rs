/*
 * Responsibility
 * - Owner-based access to a resource the handler has already loaded
 * - Runs after the access middleware; compares identities, never resource ids
 */
use crate::error::AppError;
use crate::token::Payload;

/// True when the authenticated identity is the recorded owner.
pub fn verify_payload_owner(payload: &Payload, owner: &str) -> bool {
    payload.identity() == owner
}

/// `verify_payload_owner` as a handler-friendly result.
pub fn authorize_owner(
    payload: &Payload,
    owner: &str,
    resource: &'static str,
) -> Result<(), AppError> {
    if verify_payload_owner(payload, owner) {
        return Ok(());
    }

    tracing::warn!(
        identity = %payload.identity(),
        owner = %owner,
        resource,
        "ownership check failed"
    );
    Err(AppError::NotOwner { resource })
}
