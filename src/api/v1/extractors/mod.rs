mod account_id;
mod auth_payload;
mod input;

pub use account_id::{AccountId, INVALID_ACCOUNT_ID};
pub use auth_payload::AuthPayload;
pub use input::{ApiJson, ApiQuery, INVALID_REQUEST};
