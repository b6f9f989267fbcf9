//! Encrypted access tokens (compact JWE, `dir` + `A256GCM`).
//!
//! The JSON payload is encrypted and authenticated with a content key derived
//! from the configured secret, so clients can carry the token but cannot read it.
//!
//! Wire format: `header..iv.ciphertext.tag` (five base64url segments, the
//! encrypted-key segment is empty for direct encryption).

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use josekit::jwe::{
    self, Dir, JweHeader,
    alg::direct::{DirectJweDecrypter, DirectJweEncrypter},
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use crate::token::{
    clock::{Clock, SystemClock},
    error::TokenError,
    maker::{TokenMaker, ensure_key_strength},
    payload::Payload,
};

const KEY_MANAGEMENT_ALG: &str = "dir";
const CONTENT_ENCRYPTION: &str = "A256GCM";
const COMPACT_SEGMENTS: usize = 5;

#[derive(Debug, Deserialize)]
struct ProtectedHeader {
    alg: Option<String>,
    enc: Option<String>,
}

pub struct JweMaker {
    encrypter: DirectJweEncrypter,
    decrypter: DirectJweDecrypter,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JweMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JweMaker")
            .field("alg", &KEY_MANAGEMENT_ALG)
            .field("enc", &CONTENT_ENCRYPTION)
            .finish()
    }
}

impl JweMaker {
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        Self::with_clock(secret_key, Arc::new(SystemClock))
    }

    pub fn with_clock(secret_key: &str, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        ensure_key_strength(secret_key.as_bytes())?;

        // A256GCM needs exactly 32 bytes; secrets may be longer.
        let content_key = Sha256::digest(secret_key.as_bytes());

        let encrypter = Dir
            .encrypter_from_bytes(content_key.as_slice())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let decrypter = Dir
            .decrypter_from_bytes(content_key.as_slice())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(Self {
            encrypter,
            decrypter,
            clock,
        })
    }
}

impl TokenMaker for JweMaker {
    fn create_token(
        &self,
        identity: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new_at(identity, duration, self.clock.now())?;

        let plaintext =
            serde_json::to_vec(&payload).map_err(|e| TokenError::Encoding(e.to_string()))?;

        let mut header = JweHeader::new();
        header.set_token_type("JWT");
        header.set_content_encryption(CONTENT_ENCRYPTION);

        let token = jwe::serialize_compact(&plaintext, &header, &self.encrypter).map_err(|e| {
            error!(error = %e, "failed to encrypt JWE");
            TokenError::Encoding(e.to_string())
        })?;

        debug!(token_id = %payload.id(), expires_at = %payload.expires_at(), "issued JWE");
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        check_compact_shape(token)?;

        let (plaintext, _header) =
            jwe::deserialize_compact(token, &self.decrypter).map_err(|e| {
                debug!(error = %e, "JWE decryption failed");
                TokenError::SignatureInvalid
            })?;

        let payload: Payload =
            serde_json::from_slice(&plaintext).map_err(|_| TokenError::Invalid)?;

        payload.valid_at(self.clock.now())?;
        Ok(payload)
    }
}

/// Structural checks done before any cryptography.
///
/// - segment count and base64url encoding → `Malformed`
/// - a protected header naming another algorithm → `SignatureInvalid`
fn check_compact_shape(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != COMPACT_SEGMENTS {
        return Err(TokenError::Malformed);
    }

    let mut decoded = Vec::with_capacity(COMPACT_SEGMENTS);
    for segment in &segments {
        decoded.push(
            URL_SAFE_NO_PAD
                .decode(segment)
                .map_err(|_| TokenError::Malformed)?,
        );
    }

    let header: ProtectedHeader =
        serde_json::from_slice(&decoded[0]).map_err(|_| TokenError::Malformed)?;

    if header.alg.as_deref() != Some(KEY_MANAGEMENT_ALG)
        || header.enc.as_deref() != Some(CONTENT_ENCRYPTION)
    {
        return Err(TokenError::SignatureInvalid);
    }

    Ok(())
}
