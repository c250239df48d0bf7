//! # Domain Entities
//!
//! Core domain entities of the accounts service. Both map directly to their
//! database tables.
//!
//! - **Customer**: a registered individual, unique by mobile number
//! - **Account**: the single bank account owned by a customer
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod account;
mod customer;

pub use account::{Account, AccountType, AccountsRepository};
pub use customer::{Customer, CustomerRepository};
