//! Unit of Work Pattern Implementation
//!
//! Provides transactional boundaries for database operations.
//! Ensures all operations within a business transaction succeed or fail together.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::{AccountsRepository, CustomerRepository};
use crate::shared::error::AppError;

/// An open storage transaction exposing both repositories.
///
/// Dropping a transaction without calling [`commit`](TransactionScope::commit)
/// discards every write made through it.
#[async_trait]
pub trait TransactionScope: CustomerRepository + AccountsRepository + Send + Sized {
    /// Make every write visible atomically.
    async fn commit(self) -> Result<(), AppError>;
}

/// Unit of Work trait for managing database transactions.
///
/// This pattern ensures that multiple repository operations can be
/// grouped into a single atomic transaction.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Transaction: TransactionScope;

    /// Begin a new transaction.
    async fn begin(&self) -> Result<Self::Transaction, AppError>;
}

/// Transaction context that wraps a SQLx transaction.
///
/// The repository traits are implemented for this type in
/// `infrastructure::repositories`.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Create a new transaction context.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Get a reference to the underlying transaction for query execution.
    pub fn as_mut(&mut self) -> &mut Transaction<'static, Postgres> {
        &mut self.tx
    }
}

#[async_trait]
impl TransactionScope for TransactionContext {
    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }
}

/// PostgreSQL Unit of Work implementation.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: Arc<PgPool>,
}

impl PgUnitOfWork {
    /// Create from a PgPool directly.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    type Transaction = TransactionContext;

    async fn begin(&self) -> Result<TransactionContext, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(TransactionContext::new(tx))
    }
}
