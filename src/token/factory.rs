/// Factory: pick the `TokenMaker` variant named in configuration.
use std::{fmt, str::FromStr, sync::Arc};

use crate::token::{
    clock::Clock, error::TokenError, jwe_maker::JweMaker, jwt_maker::JwtMaker, maker::TokenMaker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMakerKind {
    /// Encrypted tokens (`JweMaker`).
    Symmetric,
    /// Signed tokens (`JwtMaker`).
    Signature,
}

impl FromStr for TokenMakerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symmetric" | "jwe" | "paseto" => Ok(Self::Symmetric),
            "signature" | "jwt" => Ok(Self::Signature),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TokenMakerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => write!(f, "symmetric"),
            Self::Signature => write!(f, "signature"),
        }
    }
}

pub fn build_token_maker(
    kind: TokenMakerKind,
    secret_key: &str,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let maker: Arc<dyn TokenMaker> = match kind {
        TokenMakerKind::Symmetric => Arc::new(JweMaker::with_clock(secret_key, clock)?),
        TokenMakerKind::Signature => Arc::new(JwtMaker::with_clock(secret_key, clock)?),
    };
    Ok(maker)
}
