use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use leavedesk_api::middleware::error_handling::AppError;
use leavedesk_core::{errors::HrError, models::leave::LeaveType};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::*;

#[rstest]
#[case(HrError::NotFound("Leave request not found".into()), StatusCode::NOT_FOUND)]
#[case(HrError::Validation("Invalid Date Range".into()), StatusCode::BAD_REQUEST)]
#[case(HrError::Authentication("Missing header".into()), StatusCode::UNAUTHORIZED)]
#[case(HrError::unauthorized(), StatusCode::FORBIDDEN)]
#[case(HrError::not_pending("Leave request", "Approved"), StatusCode::CONFLICT)]
#[case(
    HrError::InsufficientBalance { leave_type: LeaveType::Sick, available: 1, requested: 3 },
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(HrError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: HrError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_error_handling_database_hides_details() {
    let response = AppError(HrError::Database(eyre::eyre!("password=hunter2"))).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_missing_identity_headers_is_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/leave-requests").expect_failure().await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("x-employee-id"));
}

#[tokio::test]
async fn test_manager_routes_reject_staff() {
    let ctx = TestContext::new().await;

    let response = as_developer(ctx.server.get("/api/reports/team"))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = as_manager(ctx.server.get("/api/leave-balance"), MANAGER)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_and_version_need_no_identity() {
    let ctx = TestContext::new().await;

    let health: Value = ctx.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");

    let version: Value = ctx.server.get("/version").await.json();
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}
