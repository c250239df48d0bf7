//! In-memory storage backend.
//!
//! Holds both tables behind one async mutex. A transaction takes the lock for
//! its whole lifetime and writes in place, recording the previous value of
//! every row it touches. Commit discards that undo log; dropping the
//! transaction replays it in reverse. Constraints mirror the PostgreSQL schema.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::unit_of_work::{TransactionScope, UnitOfWork};
use crate::domain::{Account, AccountsRepository, Customer, CustomerRepository};
use crate::shared::error::AppError;

#[derive(Debug)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    accounts: BTreeMap<i64, Account>,
    next_customer_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            customers: BTreeMap::new(),
            accounts: BTreeMap::new(),
            next_customer_id: 1,
        }
    }
}

/// Previous state of one touched row.
#[derive(Debug)]
enum Undo {
    Customer(i64, Option<Customer>),
    Account(i64, Option<Account>),
    NextCustomerId(i64),
}

/// A thread-safe in-memory unit of work.
///
/// Cloning shares the underlying tables. Ideal for tests and for running the
/// service without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUnitOfWork {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryUnitOfWork {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed customer rows.
    pub async fn customer_count(&self) -> usize {
        self.tables.lock().await.customers.len()
    }

    /// Number of committed account rows.
    pub async fn account_count(&self) -> usize {
        self.tables.lock().await.accounts.len()
    }

    /// Insert an account row directly, bypassing the customer linkage
    /// check. Used to simulate pre-existing data.
    pub async fn seed_account(&self, account: Account) {
        self.tables
            .lock()
            .await
            .accounts
            .insert(account.account_number, account);
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, AppError> {
        let tables = self.tables.clone().lock_owned().await;
        Ok(InMemoryTransaction {
            tables,
            undo: Vec::new(),
        })
    }
}

/// An open in-memory transaction.
pub struct InMemoryTransaction {
    tables: OwnedMutexGuard<Tables>,
    undo: Vec<Undo>,
}

impl InMemoryTransaction {
    fn put_customer(&mut self, customer_id: i64, row: Option<Customer>) {
        let previous = match row {
            Some(customer) => self.tables.customers.insert(customer_id, customer),
            None => self.tables.customers.remove(&customer_id),
        };
        self.undo.push(Undo::Customer(customer_id, previous));
    }

    fn put_account(&mut self, account_number: i64, row: Option<Account>) {
        let previous = match row {
            Some(account) => self.tables.accounts.insert(account_number, account),
            None => self.tables.accounts.remove(&account_number),
        };
        self.undo.push(Undo::Account(account_number, previous));
    }

    fn allocate_customer_id(&mut self) -> i64 {
        let id = self.tables.next_customer_id;
        self.undo.push(Undo::NextCustomerId(id));
        self.tables.next_customer_id += 1;
        id
    }

    fn account_numbers_of(&self, customer_id: i64) -> Vec<i64> {
        self.tables
            .accounts
            .values()
            .filter(|a| a.customer_id == customer_id)
            .map(|a| a.account_number)
            .collect()
    }

    /// Insert a new account row, enforcing the customer linkage.
    fn insert_account(&mut self, mut account: Account) -> Result<Account, AppError> {
        if !self.tables.customers.contains_key(&account.customer_id) {
            return Err(AppError::Conflict(format!(
                "Customer with id {} does not exist",
                account.customer_id
            )));
        }
        if !self.account_numbers_of(account.customer_id).is_empty() {
            return Err(AppError::Conflict(format!(
                "Customer with id {} already has an account",
                account.customer_id
            )));
        }

        account.created_at = Some(Utc::now());
        account.updated_at = None;
        self.put_account(account.account_number, Some(account.clone()));
        Ok(account)
    }

    fn undo_all(&mut self) {
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Customer(id, Some(row)) => {
                    self.tables.customers.insert(id, row);
                }
                Undo::Customer(id, None) => {
                    self.tables.customers.remove(&id);
                }
                Undo::Account(number, Some(row)) => {
                    self.tables.accounts.insert(number, row);
                }
                Undo::Account(number, None) => {
                    self.tables.accounts.remove(&number);
                }
                Undo::NextCustomerId(id) => self.tables.next_customer_id = id,
            }
        }
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        self.undo_all();
    }
}

#[async_trait]
impl TransactionScope for InMemoryTransaction {
    async fn commit(mut self) -> Result<(), AppError> {
        self.undo.clear();
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryTransaction {
    async fn find_by_mobile_number(
        &mut self,
        mobile_number: &str,
    ) -> Result<Option<Customer>, AppError> {
        Ok(self
            .tables
            .customers
            .values()
            .find(|c| c.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_by_id(&mut self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.tables.customers.get(&customer_id).cloned())
    }

    async fn save(&mut self, mut customer: Customer) -> Result<Customer, AppError> {
        let taken = self.tables.customers.values().any(|c| {
            c.mobile_number == customer.mobile_number && c.customer_id != customer.customer_id
        });
        if taken {
            return Err(AppError::Conflict(format!(
                "Customer with mobile number {} already exists",
                customer.mobile_number
            )));
        }

        let now = Utc::now();
        let id = match customer.customer_id {
            None => {
                let id = self.allocate_customer_id();
                customer.customer_id = Some(id);
                customer.created_at = Some(now);
                customer.updated_at = None;
                id
            }
            Some(id) => {
                let existing = self.tables.customers.get(&id).ok_or_else(|| {
                    AppError::NotFound(format!("Customer with id {} not found", id))
                })?;
                customer.created_at = existing.created_at;
                customer.updated_at = Some(now);
                id
            }
        };

        self.put_customer(id, Some(customer.clone()));
        Ok(customer)
    }

    async fn delete_by_id(&mut self, customer_id: i64) -> Result<(), AppError> {
        if self.tables.customers.contains_key(&customer_id) {
            self.put_customer(customer_id, None);
        }
        // ON DELETE CASCADE
        for number in self.account_numbers_of(customer_id) {
            self.put_account(number, None);
        }
        Ok(())
    }
}

#[async_trait]
impl AccountsRepository for InMemoryTransaction {
    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Option<Account>, AppError> {
        Ok(self
            .tables
            .accounts
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn find_by_account_number(
        &mut self,
        account_number: i64,
    ) -> Result<Option<Account>, AppError> {
        Ok(self.tables.accounts.get(&account_number).cloned())
    }

    async fn issue(&mut self, account: Account) -> Result<Option<Account>, AppError> {
        if self.tables.accounts.contains_key(&account.account_number) {
            return Ok(None);
        }
        self.insert_account(account).map(Some)
    }

    async fn save(&mut self, account: Account) -> Result<Account, AppError> {
        let Some(existing) = self.tables.accounts.get(&account.account_number) else {
            return self.insert_account(account);
        };

        if existing.customer_id != account.customer_id {
            return Err(AppError::Conflict(format!(
                "Account number {} is already issued",
                account.account_number
            )));
        }

        let updated = Account {
            account_type: account.account_type,
            branch_address: account.branch_address,
            updated_at: Some(Utc::now()),
            ..existing.clone()
        };
        self.put_account(updated.account_number, Some(updated.clone()));
        Ok(updated)
    }

    async fn delete_by_customer_id(&mut self, customer_id: i64) -> Result<u64, AppError> {
        let numbers = self.account_numbers_of(customer_id);
        for number in &numbers {
            self.put_account(*number, None);
        }
        Ok(numbers.len() as u64)
    }
}
