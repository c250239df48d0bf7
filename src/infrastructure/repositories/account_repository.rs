//! Accounts Repository Implementation
//!
//! PostgreSQL implementation of the AccountsRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Account, AccountType, AccountsRepository};
use crate::infrastructure::database::TransactionContext;
use crate::shared::error::AppError;

/// Database row representation matching the accounts table schema.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    account_number: i64,
    customer_id: i64,
    account_type: String,
    branch_address: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, AppError> {
        let account_type = AccountType::parse(&self.account_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown account type '{}' for account {}",
                self.account_type, self.account_number
            ))
        })?;

        Ok(Account {
            account_number: self.account_number,
            customer_id: self.customer_id,
            account_type,
            branch_address: self.branch_address,
            created_at: Some(self.created_at),
            updated_at: self.updated_at,
        })
    }
}

/// Constraint violations on the customer linkage become conflicts.
fn map_write_error(e: sqlx::Error, customer_id: i64) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("Customer with id {} already has an account", customer_id),
        ),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::Conflict(format!("Customer with id {} does not exist", customer_id))
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl AccountsRepository for TransactionContext {
    async fn find_by_customer_id(&mut self, customer_id: i64) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_number, customer_id, account_type, branch_address,
                   created_at, updated_at
            FROM accounts
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&mut **self.as_mut())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_account_number(
        &mut self,
        account_number: i64,
    ) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_number, customer_id, account_type, branch_address,
                   created_at, updated_at
            FROM accounts
            WHERE account_number = $1
            "#,
        )
        .bind(account_number)
        .fetch_optional(&mut **self.as_mut())
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// `DO NOTHING` on a taken number raises no error, so the transaction
    /// stays usable for the next candidate.
    async fn issue(&mut self, account: Account) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (account_number, customer_id, account_type, branch_address)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_number) DO NOTHING
            RETURNING account_number, customer_id, account_type, branch_address,
                      created_at, updated_at
            "#,
        )
        .bind(account.account_number)
        .bind(account.customer_id)
        .bind(account.account_type.as_str())
        .bind(&account.branch_address)
        .fetch_optional(&mut **self.as_mut())
        .await
        .map_err(|e| map_write_error(e, account.customer_id))?;

        row.map(AccountRow::into_account).transpose()
    }

    /// Upsert keyed by account number. The `WHERE` on the conflict branch
    /// keeps a colliding number owned by another customer untouched; that
    /// case returns no row and is reported as a conflict.
    async fn save(&mut self, account: Account) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (account_number, customer_id, account_type, branch_address)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_number) DO UPDATE
            SET account_type = EXCLUDED.account_type,
                branch_address = EXCLUDED.branch_address,
                updated_at = NOW()
            WHERE accounts.customer_id = EXCLUDED.customer_id
            RETURNING account_number, customer_id, account_type, branch_address,
                      created_at, updated_at
            "#,
        )
        .bind(account.account_number)
        .bind(account.customer_id)
        .bind(account.account_type.as_str())
        .bind(&account.branch_address)
        .fetch_optional(&mut **self.as_mut())
        .await
        .map_err(|e| map_write_error(e, account.customer_id))?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "Account number {} is already issued",
                account.account_number
            ))
        })?;

        row.into_account()
    }

    async fn delete_by_customer_id(&mut self, customer_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut **self.as_mut())
            .await?;

        Ok(result.rows_affected())
    }
}
