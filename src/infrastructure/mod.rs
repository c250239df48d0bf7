//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database unit of work (PostgreSQL and in-memory)
//! - Repository implementations (PostgreSQL)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
