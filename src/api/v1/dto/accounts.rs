/*
 * Responsibility
 * - Accounts request/response DTO
 * - request validation (currency, paging)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::account_repo::{AccountRow, Currency};

pub const MIN_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub currency: Option<String>,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<Currency, &'static str> {
        let currency = self
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or("currency is required")?;

        Currency::parse(currency).ok_or("currency is not supported")
    }
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub page_id: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListAccountsQuery {
    /// Returns `(limit, offset)`.
    pub fn validate(&self) -> Result<(usize, usize), &'static str> {
        let page_id = self.page_id.ok_or("page_id is required")?;
        let page_size = self.page_size.ok_or("page_size is required")?;

        if page_id < 1 {
            return Err("page_id must be at least 1");
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err("page_size must be between 5 and 10");
        }

        let limit = page_size as usize;
        let offset = (page_id as usize - 1).saturating_mul(limit);
        Ok((limit, offset))
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRow> for AccountResponse {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            balance: row.balance,
            currency: row.currency,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub deleted: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_supported_currency() {
        let req = |c: Option<&str>| CreateAccountRequest {
            currency: c.map(str::to_string),
        };

        assert_eq!(req(Some("EUR")).validate(), Ok(Currency::Eur));
        assert_eq!(req(None).validate(), Err("currency is required"));
        assert_eq!(req(Some(" ")).validate(), Err("currency is required"));
        assert_eq!(req(Some("XYZ")).validate(), Err("currency is not supported"));
    }

    #[test]
    fn paging_bounds() {
        let q = |page_id, page_size| ListAccountsQuery {
            page_id: Some(page_id),
            page_size: Some(page_size),
        };

        assert_eq!(q(1, 5).validate(), Ok((5, 0)));
        assert_eq!(q(3, 10).validate(), Ok((10, 20)));
        assert!(q(0, 5).validate().is_err());
        assert!(q(1, 4).validate().is_err());
        assert!(q(1, 11).validate().is_err());

        let missing = ListAccountsQuery {
            page_id: None,
            page_size: Some(5),
        };
        assert_eq!(missing.validate(), Err("page_id is required"));
    }
}
