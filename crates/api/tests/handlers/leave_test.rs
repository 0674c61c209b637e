use axum::http::StatusCode;
use leavedesk_core::models::leave::{
    LeaveActionResponse, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::*;

#[test_log::test(tokio::test)]
async fn test_submit_and_approve_leave_over_http() {
    let ctx = TestContext::new().await;

    let submitted: LeaveActionResponse = as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "casual",
            "start_date": "2025-06-09",
            "end_date": "2025-06-10",
        }))
        .await
        .json();
    assert_eq!(submitted.request.leave_type, LeaveType::Casual);
    assert_eq!(submitted.request.total_days, 2);
    assert_eq!(submitted.request.status, LeaveStatus::Pending);

    let pending: Vec<LeaveRequest> = as_manager(ctx.server.get("/api/leave-requests/team"), MANAGER)
        .await
        .json();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, submitted.request.id);

    let approved: LeaveActionResponse = as_manager(
        ctx.server
            .post(&format!("/api/leave-requests/{}/approve", submitted.request.id)),
        MANAGER,
    )
    .await
    .json();
    assert_eq!(approved.request.status, LeaveStatus::Approved);

    let balance: LeaveBalance = as_developer(ctx.server.get("/api/leave-balance")).await.json();
    assert_eq!(balance.casual, 10);
    assert_eq!(balance.sick, 10);
}

#[tokio::test]
async fn test_submit_rejects_leave_starting_today() {
    let ctx = TestContext::new().await;

    let response = as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "Sick",
            "start_date": "2025-06-04",
            "end_date": "2025-06-05",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: Leave cannot be applied for today"
    );
}

#[tokio::test]
async fn test_submit_over_allotment_is_unprocessable() {
    let ctx = TestContext::new().await;

    // 2025-06-09 .. 2025-06-27 is fifteen working days; Sick grants ten
    let response = as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "sick",
            "start_date": "2025-06-09",
            "end_date": "2025-06-27",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_other_team_manager_cannot_decide() {
    let ctx = TestContext::new().await;

    let submitted: LeaveActionResponse = as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "Vacation",
            "start_date": "2025-06-16",
            "end_date": "2025-06-16",
        }))
        .await
        .json();

    let response = as_manager(
        ctx.server
            .post(&format!("/api/leave-requests/{}/reject", submitted.request.id)),
        OTHER_MANAGER,
    )
    .expect_failure()
    .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let state = ctx.store.snapshot().await;
    assert_eq!(
        state.leave_requests[&submitted.request.id].status,
        LeaveStatus::Pending
    );
}

#[tokio::test]
async fn test_cancelled_request_cannot_be_approved() {
    let ctx = TestContext::new().await;

    let submitted: LeaveActionResponse = as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "Medical",
            "start_date": "2025-06-12",
            "end_date": "2025-06-13",
        }))
        .await
        .json();
    let id = submitted.request.id;

    let cancelled: LeaveActionResponse =
        as_developer(ctx.server.post(&format!("/api/leave-requests/{id}/cancel")))
            .await
            .json();
    assert_eq!(cancelled.request.status, LeaveStatus::Cancelled);

    let response = as_manager(
        ctx.server.post(&format!("/api/leave-requests/{id}/approve")),
        MANAGER,
    )
    .expect_failure()
    .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_leave_request_is_not_found() {
    let ctx = TestContext::new().await;

    let response = as_manager(
        ctx.server
            .post(&format!("/api/leave-requests/{}/approve", uuid::Uuid::new_v4())),
        MANAGER,
    )
    .expect_failure()
    .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
