//! Account entity and repository trait.
//!
//! Maps to the `accounts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Account type matching the database VARCHAR column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    #[default]
    Savings,
    Current,
}

impl AccountType {
    /// Parse the database/wire representation. Matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Some(Self::Savings),
            "current" => Some(Self::Current),
            _ => None,
        }
    }

    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Current => "Current",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank account, linked one-to-one with a customer.
///
/// Maps to the `accounts` table:
/// - account_number: BIGINT PRIMARY KEY
/// - customer_id: BIGINT NOT NULL UNIQUE REFERENCES customer
/// - account_type: VARCHAR(100) NOT NULL
/// - branch_address: VARCHAR(200) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: i64,

    /// Owning customer
    pub customer_id: i64,

    pub account_type: AccountType,

    pub branch_address: String,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Build a fresh, unsaved account for a customer.
    pub fn open(
        account_number: i64,
        customer_id: i64,
        account_type: AccountType,
        branch_address: impl Into<String>,
    ) -> Self {
        Self {
            account_number,
            customer_id,
            account_type,
            branch_address: branch_address.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Repository trait for Account data access.
///
/// Same conventions as [`CustomerRepository`](super::CustomerRepository).
#[async_trait]
pub trait AccountsRepository: Send {
    /// Find the account owned by a customer.
    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Option<Account>, AppError>;

    /// Find an account by account number.
    async fn find_by_account_number(&mut self, account_number: i64)
        -> Result<Option<Account>, AppError>;

    /// Insert a newly opened account.
    ///
    /// Returns `Ok(None)` when the account number is already issued, leaving
    /// the transaction usable so another number can be tried.
    async fn issue(&mut self, account: Account) -> Result<Option<Account>, AppError>;

    /// Insert when the account number is unknown, otherwise update the
    /// mutable columns. The customer linkage is never rewritten.
    async fn save(&mut self, account: Account) -> Result<Account, AppError>;

    /// Delete every account owned by a customer.
    async fn delete_by_customer_id(&mut self, customer_id: i64) -> Result<u64, AppError>;
}
