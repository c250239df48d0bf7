//! # Accounts Service Library
//!
//! This crate provides a banking accounts service with:
//! - RESTful HTTP API endpoints for customer/account management
//! - PostgreSQL for persistent storage, or an in-memory store
//! - Prometheus metrics and structured logging
//!
//! Every customer owns exactly one account. Creating, updating and deleting
//! touch both records inside one storage transaction.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Workflow service, DTOs and mapping
//! - **Infrastructure Layer**: Database, repositories and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! accounts_service/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, domain services
//! +-- application/    Accounts service, DTOs and mappers
//! +-- infrastructure/ Database, repositories and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
