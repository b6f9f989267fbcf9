/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - token maker, auth policy, account store
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::middleware::auth::AuthPolicy;
use crate::repos::account_repo::AccountStore;
use crate::token::TokenMaker;

#[derive(Clone, Debug)]
pub struct AppState {
    pub token_maker: Arc<dyn TokenMaker>,
    pub auth_policy: AuthPolicy,
    pub accounts: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new(
        token_maker: Arc<dyn TokenMaker>,
        auth_policy: AuthPolicy,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            token_maker,
            auth_policy,
            accounts,
        }
    }
}
