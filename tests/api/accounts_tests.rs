//! Account API Tests
//!
//! Full create/fetch/update/delete flows against the in-memory store.

use accounts_service::domain::is_issued_range;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{customer_with_mobile, eazy_bytes, TestApp};

#[tokio::test]
async fn test_create_then_fetch_returns_savings_account() {
    let app = TestApp::new();

    let response = app.create(&eazy_bytes()).await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "statusCode": "201", "statusMsg": "Account created successfully" })
    );

    let response = app.fetch("4354437687").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Eazy Bytes");
    assert_eq!(body["email"], "eazybytes@test.com");
    assert_eq!(body["mobileNumber"], "4354437687");
    assert_eq!(body["accountsDto"]["accountType"], "Savings");
    assert_eq!(body["accountsDto"]["branchAddress"], "Eazy Bank");

    let number = body["accountsDto"]["accountNumber"].as_i64().unwrap();
    assert!(is_issued_range(number), "{number} outside issued range");
}

#[tokio::test]
async fn test_second_create_with_same_mobile_conflicts() {
    let app = TestApp::new();
    app.create(&eazy_bytes()).await.assert_status(StatusCode::CREATED);

    let response = app.create(&customer_with_mobile("4354437687")).await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10005);
    assert!(body["message"].as_str().unwrap().contains("4354437687"));
    assert_eq!(app.store.customer_count().await, 1);
    assert_eq!(app.store.account_count().await, 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_mobile_number() {
    let app = TestApp::new();

    let response = app.create(&customer_with_mobile("12345")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("mobile_number:"), "{message}");
    assert_eq!(app.store.customer_count().await, 0);
}

#[tokio::test]
async fn test_fetch_unknown_mobile_returns_404() {
    let app = TestApp::new();

    let response = app.fetch("9999999999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let message = response.json::<Value>()["message"].as_str().unwrap().to_string();
    assert_eq!(
        message,
        "Customer not found with the given input data mobileNumber : '9999999999'"
    );
}

#[tokio::test]
async fn test_update_changes_customer_and_account() {
    let app = TestApp::new();
    app.create(&eazy_bytes()).await.assert_status(StatusCode::CREATED);
    let mut fetched = app.fetch("4354437687").await.json::<Value>();

    fetched["name"] = json!("Eazy Bytes Ltd");
    fetched["accountsDto"]["accountType"] = json!("Current");
    fetched["accountsDto"]["branchAddress"] = json!("123 Main Street, New York");
    let response = app.server.put("/api/update").json(&fetched).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["statusCode"], "200");

    let body = app.fetch("4354437687").await.json::<Value>();
    assert_eq!(body["name"], "Eazy Bytes Ltd");
    assert_eq!(body["accountsDto"]["accountType"], "Current");
    assert_eq!(body["accountsDto"]["branchAddress"], "123 Main Street, New York");
    assert_eq!(
        body["accountsDto"]["accountNumber"],
        fetched["accountsDto"]["accountNumber"]
    );
}

#[tokio::test]
async fn test_update_without_account_returns_417() {
    let app = TestApp::new();
    app.create(&eazy_bytes()).await.assert_status(StatusCode::CREATED);

    let response = app.server.put("/api/update").json(&eazy_bytes()).await;

    response.assert_status(StatusCode::EXPECTATION_FAILED);
    assert_eq!(response.json::<Value>()["statusCode"], "417");
}

#[tokio::test]
async fn test_update_unknown_account_returns_404() {
    let app = TestApp::new();
    let mut body = eazy_bytes();
    body["accountsDto"] = json!({
        "accountNumber": 1234567890,
        "accountType": "Savings",
        "branchAddress": "Eazy Bank"
    });

    let response = app.server.put("/api/update").json(&body).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_customer_and_account() {
    let app = TestApp::new();
    app.create(&eazy_bytes()).await.assert_status(StatusCode::CREATED);

    let response = app
        .server
        .delete("/api/delete")
        .add_query_param("mobileNumber", "4354437687")
        .await;

    response.assert_status_ok();
    assert_eq!(app.store.customer_count().await, 0);
    assert_eq!(app.store.account_count().await, 0);
    app.fetch("4354437687").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_mobile_returns_404() {
    let app = TestApp::new();

    let response = app
        .server
        .delete("/api/delete")
        .add_query_param("mobileNumber", "4354437687")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customers_receive_distinct_account_numbers() {
    let app = TestApp::new();
    let mobiles = ["1111111111", "2222222222", "3333333333", "4444444444"];

    for mobile in mobiles {
        app.create(&customer_with_mobile(mobile))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let mut numbers = Vec::new();
    for mobile in mobiles {
        let body = app.fetch(mobile).await.json::<Value>();
        numbers.push(body["accountsDto"]["accountNumber"].as_i64().unwrap());
    }
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), mobiles.len());
}

#[tokio::test]
async fn test_missing_query_parameter_returns_error_body() {
    let app = TestApp::new();

    let response = app.server.get("/api/fetch").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10002);
}
