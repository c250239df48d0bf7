//! Account Handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::response::{MESSAGE_417_DELETE, MESSAGE_417_UPDATE, STATUS_417};
use crate::application::dto::{CustomerDto, MobileNumberQuery, ResponseDto};
use crate::presentation::http::extractors::{ApiJson, ApiQuery};
use crate::shared::error::AppError;
use crate::shared::validation::{ensure_mobile_number, validation_error};
use crate::startup::AppState;

/// Register a customer and open their account
pub async fn create_account(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CustomerDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    body.validate().map_err(validation_error)?;

    state.accounts.create_account(body).await?;

    Ok((StatusCode::CREATED, Json(ResponseDto::created())))
}

/// Fetch customer and account details by mobile number
pub async fn fetch_account(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MobileNumberQuery>,
) -> Result<Json<CustomerDto>, AppError> {
    ensure_mobile_number(&query.mobile_number)?;

    let customer = state.accounts.fetch_account(&query.mobile_number).await?;

    Ok(Json(customer))
}

/// Update account and customer details
pub async fn update_account(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CustomerDto>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    body.validate().map_err(validation_error)?;

    if state.accounts.update_account(body).await? {
        Ok((StatusCode::OK, Json(ResponseDto::ok())))
    } else {
        Ok((
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_UPDATE)),
        ))
    }
}

/// Delete customer and account by mobile number
pub async fn delete_account(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MobileNumberQuery>,
) -> Result<(StatusCode, Json<ResponseDto>), AppError> {
    ensure_mobile_number(&query.mobile_number)?;

    if state.accounts.delete_account(&query.mobile_number).await? {
        Ok((StatusCode::OK, Json(ResponseDto::ok())))
    } else {
        Ok((
            StatusCode::EXPECTATION_FAILED,
            Json(ResponseDto::new(STATUS_417, MESSAGE_417_DELETE)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::application::dto::{AccountsDto, CustomerDto, ResponseDto};
    use crate::application::services::{AccountsError, MockAccountsService};
    use crate::config::Settings;
    use crate::presentation::http::routes::create_router;
    use crate::shared::error::AppError;
    use crate::startup::AppState;

    fn server(mock: MockAccountsService) -> TestServer {
        let state = AppState {
            accounts: Arc::new(mock),
            db: None,
            settings: Arc::new(Settings::defaults().unwrap()),
        };
        TestServer::new(create_router(state)).unwrap()
    }

    fn body() -> Value {
        json!({
            "name": "Eazy Bytes",
            "email": "eazybytes@test.com",
            "mobileNumber": "4354437687"
        })
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let mut mock = MockAccountsService::new();
        mock.expect_create_account()
            .withf(|c| c.mobile_number == "4354437687")
            .times(1)
            .returning(|_| Ok(()));

        let response = server(mock).post("/api/create").json(&body()).await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<ResponseDto>(), ResponseDto::created());
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_409() {
        let mut mock = MockAccountsService::new();
        mock.expect_create_account()
            .returning(|c| Err(AccountsError::AlreadyExists(c.mobile_number)));

        let response = server(mock).post("/api/create").json(&body()).await;

        response.assert_status(StatusCode::CONFLICT);
        let json = response.json::<Value>();
        assert_eq!(json["code"], 10005);
    }

    #[tokio::test]
    async fn test_create_invalid_body_never_reaches_service() {
        let mut mock = MockAccountsService::new();
        mock.expect_create_account().times(0);

        let response = server(mock)
            .post("/api/create")
            .json(&json!({
                "name": "Eazy Bytes",
                "email": "eazybytes@test.com",
                "mobileNumber": "12"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], 10007);
    }

    #[tokio::test]
    async fn test_fetch_returns_customer() {
        let mut mock = MockAccountsService::new();
        mock.expect_fetch_account()
            .withf(|m| m.to_string() == "4354437687")
            .returning(|_| {
                Ok(CustomerDto {
                    name: "Eazy Bytes".into(),
                    email: "eazybytes@test.com".into(),
                    mobile_number: "4354437687".into(),
                    accounts_dto: Some(AccountsDto {
                        account_number: 1_234_567_890,
                        account_type: "Savings".into(),
                        branch_address: "Eazy Bank".into(),
                    }),
                })
            });

        let response = server(mock)
            .get("/api/fetch")
            .add_query_param("mobileNumber", "4354437687")
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["accountsDto"]["accountNumber"], 1_234_567_890_i64);
        assert_eq!(json["accountsDto"]["accountType"], "Savings");
    }

    #[tokio::test]
    async fn test_fetch_missing_returns_404() {
        let mut mock = MockAccountsService::new();
        mock.expect_fetch_account().returning(|m| {
            Err(AccountsError::NotFound {
                resource: "Customer",
                field: "mobileNumber",
                value: m.to_string(),
            })
        });

        let response = server(mock)
            .get("/api/fetch")
            .add_query_param("mobileNumber", "4354437687")
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], 10001);
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_mobile_number() {
        let mut mock = MockAccountsService::new();
        mock.expect_fetch_account().times(0);

        let response = server(mock)
            .get("/api/fetch")
            .add_query_param("mobileNumber", "abc")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_app_error() {
        let mut mock = MockAccountsService::new();
        mock.expect_create_account().times(0);

        let response = server(mock)
            .post("/api/create")
            .text("{\"name\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], 10002);
    }

    #[tokio::test]
    async fn test_missing_mobile_number_returns_app_error() {
        let mut mock = MockAccountsService::new();
        mock.expect_delete_account().times(0);

        let response = server(mock).delete("/api/delete").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json::<Value>();
        assert_eq!(json["code"], 10002);
        assert!(json["message"].as_str().unwrap().contains("mobileNumber"));
    }

    #[tokio::test]
    async fn test_update_not_applied_returns_417() {
        let mut mock = MockAccountsService::new();
        mock.expect_update_account().returning(|_| Ok(false));

        let response = server(mock).put("/api/update").json(&body()).await;

        response.assert_status(StatusCode::EXPECTATION_FAILED);
        assert_eq!(response.json::<ResponseDto>().status_code, "417");
    }

    #[tokio::test]
    async fn test_update_applied_returns_200() {
        let mut mock = MockAccountsService::new();
        mock.expect_update_account().returning(|_| Ok(true));

        let mut request = body();
        request["accountsDto"] = json!({
            "accountNumber": 1_234_567_890_i64,
            "accountType": "Current",
            "branchAddress": "Eazy Bank"
        });
        let response = server(mock).put("/api/update").json(&request).await;

        response.assert_status_ok();
        assert_eq!(response.json::<ResponseDto>(), ResponseDto::ok());
    }

    #[tokio::test]
    async fn test_delete_returns_200() {
        let mut mock = MockAccountsService::new();
        mock.expect_delete_account()
            .withf(|m| m.to_string() == "4354437687")
            .returning(|_| Ok(true));

        let response = server(mock)
            .delete("/api/delete")
            .add_query_param("mobileNumber", "4354437687")
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500_without_details() {
        let mut mock = MockAccountsService::new();
        mock.expect_delete_account().returning(|_| {
            Err(AccountsError::Storage(AppError::Internal(
                "connection reset".into(),
            )))
        });

        let response = server(mock)
            .delete("/api/delete")
            .add_query_param("mobileNumber", "4354437687")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["message"], "Internal server error");
    }
}
