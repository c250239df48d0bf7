//! REST API endpoint tests

mod accounts_tests;
mod health_tests;
