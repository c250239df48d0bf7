//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AccountsService**: customer/account create, fetch, update and delete

pub mod accounts_service;

pub use accounts_service::{AccountsError, AccountsService, AccountsServiceImpl};

#[cfg(test)]
pub use accounts_service::MockAccountsService;
