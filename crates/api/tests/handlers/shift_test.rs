use axum::http::StatusCode;
use leavedesk_core::models::{
    employee::Role,
    shift::{
        Shift, ShiftActionResponse, ShiftSwapRequest, ShiftTime, ShiftView, SwapActionResponse,
        SwapStatus,
    },
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::*;

async fn assign_week(ctx: &TestContext) -> Vec<Shift> {
    let response: ShiftActionResponse = as_manager(ctx.server.post("/api/shifts"), MANAGER)
        .json(&json!({
            "employee_id": DEVELOPER,
            "start_date": "2025-06-05",
            "shift_time": "Morning",
        }))
        .await
        .json();
    response.shifts
}

#[test_log::test(tokio::test)]
async fn test_assign_skips_weekend() {
    let ctx = TestContext::new().await;

    let shifts = assign_week(&ctx).await;

    let dates: Vec<_> = shifts.iter().map(|s| s.shift_date).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 6, 5),
            date(2025, 6, 6),
            date(2025, 6, 9),
            date(2025, 6, 10),
            date(2025, 6, 11),
        ]
    );

    let mine: Vec<ShiftView> = as_developer(ctx.server.get("/api/shifts")).await.json();
    assert_eq!(mine.len(), 5);
    assert!(mine.iter().all(|view| view.swap_status.is_none()));

    let team: Vec<Shift> = as_manager(ctx.server.get("/api/shifts/team"), MANAGER)
        .await
        .json();
    assert_eq!(team.len(), 5);
}

#[tokio::test]
async fn test_assign_outside_team_is_forbidden() {
    let ctx = TestContext::new().await;

    let response = as_manager(ctx.server.post("/api/shifts"), MANAGER)
        .json(&json!({
            "employee_id": OUTSIDER,
            "start_date": "2025-06-05",
            "shift_time": "Night",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(ctx.store.snapshot().await.shifts.is_empty());
}

#[tokio::test]
async fn test_assign_for_today_is_rejected() {
    let ctx = TestContext::new().await;

    let response = as_manager(ctx.server.post("/api/shifts"), MANAGER)
        .json(&json!({
            "employee_id": DEVELOPER,
            "start_date": "2025-06-04",
            "shift_time": "Afternoon",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_swap_lifecycle_over_http() {
    let ctx = TestContext::new().await;
    let shifts = assign_week(&ctx).await;
    let target = &shifts[1];

    let created: SwapActionResponse = as_developer(ctx.server.post("/api/shift-swaps"))
        .json(&json!({ "shift_id": target.id, "change_to": "Afternoon" }))
        .await
        .json();
    assert_eq!(created.request.status, SwapStatus::Pending);
    assert_eq!(created.request.change_from, ShiftTime::Morning);

    let updated: SwapActionResponse = as_developer(
        ctx.server
            .put(&format!("/api/shift-swaps/{}", created.request.id)),
    )
    .json(&json!({ "change_to": "Night" }))
    .await
    .json();
    assert_eq!(updated.request.change_to, ShiftTime::Night);

    let pending: Vec<ShiftSwapRequest> = as_manager(ctx.server.get("/api/shift-swaps/team"), MANAGER)
        .await
        .json();
    assert_eq!(pending.len(), 1);

    let approved: SwapActionResponse = as_manager(
        ctx.server
            .post(&format!("/api/shift-swaps/{}/approve", created.request.id)),
        MANAGER,
    )
    .await
    .json();
    assert_eq!(approved.request.status, SwapStatus::Approved);

    let state = ctx.store.snapshot().await;
    assert_eq!(state.shifts[&target.id].shift_time, ShiftTime::Night);

    let mine: Vec<ShiftView> = as_developer(ctx.server.get("/api/shifts")).await.json();
    let view = mine.iter().find(|view| view.shift.id == target.id).unwrap();
    assert_eq!(view.swap_status, Some(SwapStatus::Approved));
}

#[tokio::test]
async fn test_swap_on_someone_elses_shift_is_forbidden() {
    let ctx = TestContext::new().await;
    let shifts = assign_week(&ctx).await;

    let response = as_employee(ctx.server.post("/api/shift-swaps"), TESTER, Role::Tester)
        .json(&json!({ "shift_id": shifts[0].id, "change_to": "Night" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(ctx.store.snapshot().await.swap_requests.is_empty());
}

#[tokio::test]
async fn test_duplicate_swap_is_conflict() {
    let ctx = TestContext::new().await;
    let shifts = assign_week(&ctx).await;
    let payload = json!({ "shift_id": shifts[2].id, "change_to": "Afternoon" });

    as_developer(ctx.server.post("/api/shift-swaps"))
        .json(&payload)
        .await
        .assert_status_ok();

    let response = as_developer(ctx.server.post("/api/shift-swaps"))
        .json(&payload)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
