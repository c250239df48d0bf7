//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! Both traits are implemented directly on [`TransactionContext`], so every
//! query runs inside the transaction opened by [`PgUnitOfWork`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use accounts_service::domain::CustomerRepository;
//! use accounts_service::infrastructure::database::{PgUnitOfWork, TransactionScope, UnitOfWork};
//!
//! let uow = PgUnitOfWork::from_pool(pool);
//! let mut tx = uow.begin().await?;
//! let customer = tx.find_by_mobile_number("4354437687").await?;
//! tx.commit().await?;
//! ```
//!
//! [`TransactionContext`]: crate::infrastructure::database::TransactionContext
//! [`PgUnitOfWork`]: crate::infrastructure::database::PgUnitOfWork

pub mod account_repository;
pub mod customer_repository;
