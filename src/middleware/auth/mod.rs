pub mod access;

pub use access::{AuthError, AuthPolicy};
