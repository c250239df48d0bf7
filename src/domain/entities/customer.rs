//! Customer entity and repository trait.
//!
//! Maps to the `customer` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A registered individual, reachable by their mobile number.
///
/// Maps to the `customer` table:
/// - customer_id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - email: VARCHAR(100) NOT NULL
/// - mobile_number: VARCHAR(20) NOT NULL UNIQUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Customer {
    /// Store-assigned identifier, `None` until the first save.
    pub customer_id: Option<i64>,

    pub name: String,

    pub email: String,

    /// External identity of the customer (unique)
    pub mobile_number: String,

    /// Set by the store on insert
    pub created_at: Option<DateTime<Utc>>,

    /// Set by the store on every update
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository trait for Customer data access.
///
/// Methods take `&mut self` because implementations run inside an open
/// storage transaction. Absence is reported as `Ok(None)`.
#[async_trait]
pub trait CustomerRepository: Send {
    /// Find a customer by mobile number.
    async fn find_by_mobile_number(&mut self, mobile_number: &str)
        -> Result<Option<Customer>, AppError>;

    /// Find a customer by identifier.
    async fn find_by_id(&mut self, customer_id: i64) -> Result<Option<Customer>, AppError>;

    /// Insert when `customer_id` is `None`, otherwise update.
    ///
    /// Fails with `AppError::Conflict` when the mobile number belongs to
    /// another customer.
    async fn save(&mut self, customer: Customer) -> Result<Customer, AppError>;

    /// Delete a customer by identifier. Deleting a missing row is not an error.
    async fn delete_by_id(&mut self, customer_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_customer_has_no_store_fields() {
        let customer = Customer::default();
        assert!(customer.customer_id.is_none());
        assert!(customer.created_at.is_none());
        assert!(customer.updated_at.is_none());
    }
}
