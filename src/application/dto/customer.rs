//! Customer and Account DTOs
//!
//! The same shapes travel in both directions: create/update request bodies
//! and the fetch response.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::AccountType;
use crate::shared::validation::validate_mobile_number;

/// Customer details, optionally carrying the customer's account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[validate(length(
        min = 5,
        max = 30,
        message = "The length of the customer name should be between 5 and 30"
    ))]
    pub name: String,

    #[validate(email(message = "Email address should be a valid value"))]
    pub email: String,

    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    /// Present on fetch responses; required for updates.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "account")]
    #[validate(nested)]
    pub accounts_dto: Option<AccountsDto>,
}

/// Account details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountsDto {
    #[validate(range(
        min = 1_000_000_000_i64,
        max = 9_999_999_999_i64,
        message = "AccountNumber must be 10 digits"
    ))]
    pub account_number: i64,

    #[validate(custom(function = "validate_account_type"))]
    pub account_type: String,

    #[validate(length(min = 1, message = "BranchAddress can not be a null or empty"))]
    pub branch_address: String,
}

fn validate_account_type(value: &str) -> Result<(), ValidationError> {
    match AccountType::parse(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("account_type");
            err.message = Some("AccountType must be Savings or Current".into());
            Err(err)
        }
    }
}
