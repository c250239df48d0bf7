//! Entity <-> DTO mapping.
//!
//! Pure field copies. Store-generated values (`customer_id`, audit
//! timestamps) are never taken from a DTO, and the account number and
//! customer linkage of an existing account are never overwritten.

use crate::application::dto::{AccountsDto, CustomerDto};
use crate::domain::{Account, AccountType, Customer};

/// Customer fields only; the account is attached separately.
pub fn map_to_customer_dto(customer: &Customer) -> CustomerDto {
    CustomerDto {
        name: customer.name.clone(),
        email: customer.email.clone(),
        mobile_number: customer.mobile_number.clone(),
        accounts_dto: None,
    }
}

/// Copy the DTO's customer fields onto `customer` (fresh or loaded).
pub fn map_to_customer(dto: &CustomerDto, customer: Customer) -> Customer {
    Customer {
        name: dto.name.clone(),
        email: dto.email.clone(),
        mobile_number: dto.mobile_number.clone(),
        ..customer
    }
}

pub fn map_to_accounts_dto(account: &Account) -> AccountsDto {
    AccountsDto {
        account_number: account.account_number,
        account_type: account.account_type.as_str().to_string(),
        branch_address: account.branch_address.clone(),
    }
}

/// Copy the DTO's mutable account fields onto a loaded account.
///
/// An unrecognised account type keeps the current one; request validation
/// rejects those before they get here.
pub fn map_to_account(dto: &AccountsDto, account: Account) -> Account {
    Account {
        account_type: AccountType::parse(&dto.account_type).unwrap_or(account.account_type),
        branch_address: dto.branch_address.clone(),
        ..account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn stored_customer() -> Customer {
        Customer {
            customer_id: Some(9),
            name: "Eazy Bytes".into(),
            email: "eazybytes@test.com".into(),
            mobile_number: "4354437687".into(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    fn stored_account() -> Account {
        Account {
            account_number: 1_234_567_890,
            customer_id: 9,
            account_type: AccountType::Savings,
            branch_address: "Eazy Bank".into(),
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn test_customer_to_dto_copies_shared_fields() {
        let dto = map_to_customer_dto(&stored_customer());
        assert_eq!(
            dto,
            CustomerDto {
                name: "Eazy Bytes".into(),
                email: "eazybytes@test.com".into(),
                mobile_number: "4354437687".into(),
                accounts_dto: None,
            }
        );
    }

    #[test]
    fn test_dto_to_fresh_customer_has_no_generated_fields() {
        let dto = map_to_customer_dto(&stored_customer());
        let customer = map_to_customer(&dto, Customer::default());

        assert_eq!(customer.customer_id, None);
        assert_eq!(customer.created_at, None);
        assert_eq!(customer.mobile_number, "4354437687");
    }

    #[test]
    fn test_dto_onto_loaded_customer_keeps_identity() {
        let existing = stored_customer();
        let dto = CustomerDto {
            name: "Eazy Bytes Ltd".into(),
            email: "hello@eazybytes.com".into(),
            mobile_number: "9999999999".into(),
            accounts_dto: None,
        };

        let updated = map_to_customer(&dto, existing.clone());
        assert_eq!(updated.customer_id, existing.customer_id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.name, "Eazy Bytes Ltd");
        assert_eq!(updated.email, "hello@eazybytes.com");
        assert_eq!(updated.mobile_number, "9999999999");
    }

    #[test]
    fn test_account_to_dto() {
        let dto = map_to_accounts_dto(&stored_account());
        assert_eq!(
            dto,
            AccountsDto {
                account_number: 1_234_567_890,
                account_type: "Savings".into(),
                branch_address: "Eazy Bank".into(),
            }
        );
    }

    #[test]
    fn test_dto_onto_account_never_moves_number_or_owner() {
        let dto = AccountsDto {
            account_number: 1_111_111_111,
            account_type: "Current".into(),
            branch_address: "Main Street".into(),
        };

        let updated = map_to_account(&dto, stored_account());
        assert_eq!(updated.account_number, 1_234_567_890);
        assert_eq!(updated.customer_id, 9);
        assert_eq!(updated.account_type, AccountType::Current);
        assert_eq!(updated.branch_address, "Main Street");
    }

    #[test]
    fn test_unknown_account_type_keeps_current_value() {
        let dto = AccountsDto {
            account_number: 1_234_567_890,
            account_type: "Checking".into(),
            branch_address: "Eazy Bank".into(),
        };

        let updated = map_to_account(&dto, stored_account());
        assert_eq!(updated.account_type, AccountType::Savings);
    }
}
