//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity.
//!
//! ## Services
//!
//! - **AccountNumberGenerator**: candidate account numbers for new accounts

mod account_number;

pub use account_number::*;
