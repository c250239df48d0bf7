//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use accounts_service::config::Settings;
use accounts_service::infrastructure::database::InMemoryUnitOfWork;
use accounts_service::startup::{build_router, AppState};
use axum_test::TestServer;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use serde_json::{json, Value};

/// Test application backed by the in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryUnitOfWork,
}

impl TestApp {
    /// Create a new test application with an empty store
    pub fn new() -> Self {
        let store = InMemoryUnitOfWork::new();
        let settings = Settings::defaults().expect("default settings");
        let state = AppState::in_memory(settings, store.clone());
        let server = TestServer::new(build_router(state)).expect("test server");
        Self { server, store }
    }

    /// Register a customer through the API
    pub async fn create(&self, body: &Value) -> axum_test::TestResponse {
        self.server.post("/api/create").json(body).await
    }

    /// Fetch a customer through the API
    pub async fn fetch(&self, mobile_number: &str) -> axum_test::TestResponse {
        self.server
            .get("/api/fetch")
            .add_query_param("mobileNumber", mobile_number)
            .await
    }
}

/// The customer used throughout the account scenarios
pub fn eazy_bytes() -> Value {
    json!({
        "name": "Eazy Bytes",
        "email": "eazybytes@test.com",
        "mobileNumber": "4354437687"
    })
}

/// A valid customer body with a random email
pub fn customer_with_mobile(mobile_number: &str) -> Value {
    let email: String = SafeEmail().fake();
    json!({
        "name": "Random Customer",
        "email": email,
        "mobileNumber": mobile_number
    })
}
