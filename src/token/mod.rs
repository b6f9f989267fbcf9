/*
 * Responsibility
 * - Token issuance / verification core (Payload, Clock, TokenMaker)
 * - Two interchangeable makers: JWE (encrypted) and JWT (signed)
 * - Nothing here knows about axum; middleware and handlers consume `TokenMaker`
 */
pub mod clock;
pub mod error;
pub mod factory;
pub mod jwe_maker;
pub mod jwt_maker;
pub mod maker;
pub mod payload;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{PayloadError, TokenError};
pub use factory::{TokenMakerKind, build_token_maker};
pub use jwe_maker::JweMaker;
pub use jwt_maker::JwtMaker;
pub use maker::{MIN_SECRET_KEY_LEN, TokenMaker};
pub use payload::Payload;
