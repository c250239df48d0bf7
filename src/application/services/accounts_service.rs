//! Accounts Service
//!
//! Keeps a customer and their single account consistent across create,
//! fetch, update and delete. Each operation runs inside one storage
//! transaction; returning early on any error drops the transaction and
//! discards its writes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::application::dto::CustomerDto;
use crate::application::mapper;
use crate::config::AccountSettings;
use crate::domain::{
    Account, AccountNumberGenerator, AccountType, AccountsRepository, Customer,
    CustomerRepository,
};
use crate::infrastructure::database::{TransactionScope, UnitOfWork};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Accounts service trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Register a customer and open their account.
    async fn create_account(&self, customer: CustomerDto) -> Result<(), AccountsError>;

    /// Customer details plus account, looked up by mobile number.
    async fn fetch_account(&self, mobile_number: &str) -> Result<CustomerDto, AccountsError>;

    /// Update account and customer fields. `Ok(false)` when the request
    /// carries no account.
    async fn update_account(&self, customer: CustomerDto) -> Result<bool, AccountsError>;

    /// Remove a customer together with their account.
    async fn delete_account(&self, mobile_number: &str) -> Result<bool, AccountsError>;
}

/// Accounts service errors
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("Customer already registered with given mobileNumber {0}")]
    AlreadyExists(String),

    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("No unused account number found after {0} attempts")]
    AccountNumberExhausted(u32),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl AccountsError {
    fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    /// Label used for the operations metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound { .. } => "not_found",
            Self::AccountNumberExhausted(_) | Self::Storage(_) => "error",
        }
    }
}

impl From<AccountsError> for AppError {
    fn from(err: AccountsError) -> Self {
        match err {
            AccountsError::AlreadyExists(_) => AppError::Conflict(err.to_string()),
            AccountsError::NotFound { .. } => AppError::NotFound(err.to_string()),
            AccountsError::AccountNumberExhausted(_) => AppError::Internal(err.to_string()),
            AccountsError::Storage(e) => e,
        }
    }
}

/// A storage-level uniqueness conflict on the customer row means the
/// mobile number is taken.
fn mobile_number_conflict(err: AppError, mobile_number: &str) -> AccountsError {
    match err {
        AppError::Conflict(_) => AccountsError::AlreadyExists(mobile_number.to_string()),
        e => AccountsError::Storage(e),
    }
}

fn persisted_id(customer: &Customer) -> Result<i64, AccountsError> {
    customer.customer_id.ok_or_else(|| {
        AccountsError::Storage(AppError::Internal(format!(
            "Customer {} has no identifier",
            customer.mobile_number
        )))
    })
}

fn observe<T>(operation: &str, result: Result<T, AccountsError>) -> Result<T, AccountsError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_account_operation(operation, outcome);
    result
}

/// AccountsService implementation
pub struct AccountsServiceImpl<W, G>
where
    W: UnitOfWork,
    G: AccountNumberGenerator,
{
    uow: Arc<W>,
    generator: Arc<G>,
    settings: AccountSettings,
}

impl<W, G> AccountsServiceImpl<W, G>
where
    W: UnitOfWork,
    G: AccountNumberGenerator,
{
    pub fn new(uow: Arc<W>, generator: Arc<G>, settings: AccountSettings) -> Self {
        Self {
            uow,
            generator,
            settings,
        }
    }

    /// Issue a new account, drawing candidates until one is free.
    ///
    /// A taken number, whether already committed or inserted concurrently,
    /// costs one attempt and never surfaces as a conflict.
    async fn open_account(
        &self,
        tx: &mut W::Transaction,
        customer_id: i64,
    ) -> Result<Account, AccountsError> {
        let attempts = self.settings.max_account_number_attempts;

        for attempt in 1..=attempts {
            let candidate = self.generator.next_candidate();
            let account = Account::open(
                candidate,
                customer_id,
                AccountType::Savings,
                self.settings.branch_address.as_str(),
            );
            if let Some(issued) = tx.issue(account).await? {
                return Ok(issued);
            }
            warn!(account_number = candidate, attempt, "Account number already issued");
        }

        Err(AccountsError::AccountNumberExhausted(attempts))
    }

    async fn create(&self, customer_dto: CustomerDto) -> Result<(), AccountsError> {
        let customer = mapper::map_to_customer(&customer_dto, Customer::default());
        let mut tx = self.uow.begin().await?;

        if tx
            .find_by_mobile_number(&customer.mobile_number)
            .await?
            .is_some()
        {
            return Err(AccountsError::AlreadyExists(customer.mobile_number));
        }

        let saved = CustomerRepository::save(&mut tx, customer)
            .await
            .map_err(|e| mobile_number_conflict(e, &customer_dto.mobile_number))?;
        let customer_id = persisted_id(&saved)?;

        let account = self.open_account(&mut tx, customer_id).await?;

        tx.commit().await?;

        info!(
            customer_id,
            account_number = account.account_number,
            "Account created"
        );
        Ok(())
    }

    async fn fetch(&self, mobile_number: &str) -> Result<CustomerDto, AccountsError> {
        let mut tx = self.uow.begin().await?;

        let customer = tx
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "mobileNumber", mobile_number))?;
        let customer_id = persisted_id(&customer)?;

        let account = tx
            .find_by_customer_id(customer_id)
            .await?
            .ok_or_else(|| AccountsError::not_found("Account", "customerId", customer_id))?;

        tx.commit().await?;

        let mut dto = mapper::map_to_customer_dto(&customer);
        dto.accounts_dto = Some(mapper::map_to_accounts_dto(&account));
        Ok(dto)
    }

    async fn update(&self, customer_dto: CustomerDto) -> Result<bool, AccountsError> {
        let Some(accounts_dto) = customer_dto.accounts_dto.as_ref() else {
            return Ok(false);
        };

        let mut tx = self.uow.begin().await?;

        let account = tx
            .find_by_account_number(accounts_dto.account_number)
            .await?
            .ok_or_else(|| {
                AccountsError::not_found("Account", "AccountNumber", accounts_dto.account_number)
            })?;
        let account = mapper::map_to_account(accounts_dto, account);
        let account = AccountsRepository::save(&mut tx, account).await?;

        let customer_id = account.customer_id;
        let customer = tx
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "CustomerID", customer_id))?;
        let customer = mapper::map_to_customer(&customer_dto, customer);
        CustomerRepository::save(&mut tx, customer)
            .await
            .map_err(|e| mobile_number_conflict(e, &customer_dto.mobile_number))?;

        tx.commit().await?;

        info!(
            customer_id,
            account_number = account.account_number,
            "Account updated"
        );
        Ok(true)
    }

    async fn delete(&self, mobile_number: &str) -> Result<bool, AccountsError> {
        let mut tx = self.uow.begin().await?;

        let customer = tx
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "mobileNumber", mobile_number))?;
        let customer_id = persisted_id(&customer)?;

        let removed = tx.delete_by_customer_id(customer_id).await?;
        tx.delete_by_id(customer_id).await?;

        tx.commit().await?;

        info!(customer_id, accounts_removed = removed, "Account deleted");
        Ok(true)
    }
}

#[async_trait]
impl<W, G> AccountsService for AccountsServiceImpl<W, G>
where
    W: UnitOfWork + 'static,
    G: AccountNumberGenerator + 'static,
{
    #[instrument(skip_all, fields(mobile_number = %customer.mobile_number))]
    async fn create_account(&self, customer: CustomerDto) -> Result<(), AccountsError> {
        observe("create", self.create(customer).await)
    }

    #[instrument(skip(self))]
    async fn fetch_account(&self, mobile_number: &str) -> Result<CustomerDto, AccountsError> {
        observe("fetch", self.fetch(mobile_number).await)
    }

    #[instrument(skip_all, fields(mobile_number = %customer.mobile_number))]
    async fn update_account(&self, customer: CustomerDto) -> Result<bool, AccountsError> {
        observe("update", self.update(customer).await)
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, mobile_number: &str) -> Result<bool, AccountsError> {
        observe("delete", self.delete(mobile_number).await)
    }
}
