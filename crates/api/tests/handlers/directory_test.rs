use axum::http::StatusCode;
use leavedesk_core::models::{
    employee::{Employee, Role},
    holiday::Holiday,
    report::TeamReport,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::*;

#[tokio::test]
async fn test_profile_and_team_listing() {
    let ctx = TestContext::new().await;

    let me: Employee = as_developer(ctx.server.get("/api/employees/me")).await.json();
    assert_eq!(me.id, DEVELOPER);
    assert_eq!(me.role, Role::Developer);
    assert_eq!(me.manager_id, Some(MANAGER));

    let team: Vec<Employee> = as_manager(ctx.server.get("/api/employees/team"), MANAGER)
        .await
        .json();
    let ids: Vec<_> = team.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![DEVELOPER, TESTER]);
}

#[tokio::test]
async fn test_present_today_and_team_report() {
    let ctx = TestContext::new().await;
    as_developer(ctx.server.post("/api/attendance/clock-in"))
        .await
        .assert_status_ok();

    let present: Vec<Employee> = as_manager(ctx.server.get("/api/employees/team/present"), MANAGER)
        .await
        .json();
    assert_eq!(present.len(), 1);
    assert_eq!(present[0].id, DEVELOPER);

    as_developer(ctx.server.post("/api/leave-requests"))
        .json(&json!({
            "leave_type": "Casual",
            "start_date": "2025-06-20",
            "end_date": "2025-06-20",
        }))
        .await
        .assert_status_ok();

    let report: TeamReport = as_manager(ctx.server.get("/api/reports/team"), MANAGER)
        .await
        .json();
    assert_eq!(
        report,
        TeamReport {
            total_employees: 2,
            pending_leave_requests: 1,
            pending_swap_requests: 0,
            absent_employees: 1,
        }
    );
}

#[tokio::test]
async fn test_holiday_calendar_endpoints() {
    let ctx = TestContext::new().await;

    for (day, description) in [
        ("2025-01-26", "Republic Day"),
        ("2025-08-15", "Independence Day"),
        ("2025-10-02", "Gandhi Jayanti"),
    ] {
        as_manager(ctx.server.post("/api/holidays"), MANAGER)
            .json(&json!({ "date": day, "description": description }))
            .await
            .assert_status_ok();
    }

    let duplicate = as_manager(ctx.server.post("/api/holidays"), MANAGER)
        .json(&json!({ "date": "2025-08-15", "description": "Again" }))
        .expect_failure()
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);

    let staff_attempt = as_developer(ctx.server.post("/api/holidays"))
        .json(&json!({ "date": "2025-12-25", "description": "Christmas" }))
        .expect_failure()
        .await;
    staff_attempt.assert_status(StatusCode::FORBIDDEN);

    let year: Vec<Holiday> = as_developer(ctx.server.get("/api/holidays").add_query_param("year", 2025))
        .await
        .json();
    assert_eq!(year.len(), 3);

    let upcoming: Vec<Holiday> = as_developer(ctx.server.get("/api/holidays/upcoming"))
        .await
        .json();
    let descriptions: Vec<_> = upcoming.iter().map(|h| h.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Independence Day", "Gandhi Jayanti"]);
}
