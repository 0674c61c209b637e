use axum::http::StatusCode;
use leavedesk_core::models::attendance::{Attendance, AttendanceActionResponse};
use pretty_assertions::assert_eq;

use crate::test_utils::*;

#[tokio::test]
async fn test_clock_in_once_per_day() {
    let ctx = TestContext::new().await;

    let first: AttendanceActionResponse =
        as_developer(ctx.server.post("/api/attendance/clock-in")).await.json();
    assert!(first.attendance.clocked_in);
    assert!(!first.attendance.clocked_out);
    assert_eq!(first.attendance.date, date(2025, 6, 4));

    let again = as_developer(ctx.server.post("/api/attendance/clock-in"))
        .expect_failure()
        .await;
    again.assert_status(StatusCode::CONFLICT);

    let week: Vec<Attendance> = as_developer(ctx.server.get("/api/attendance/week")).await.json();
    assert_eq!(week.len(), 1);
}

#[tokio::test]
async fn test_clock_out_without_clock_in_is_not_found() {
    let ctx = TestContext::new().await;

    let response = as_developer(ctx.server.post("/api/attendance/clock-out"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clock_in_on_weekend_is_rejected() {
    // Saturday
    let ctx = TestContext::at(date(2025, 6, 7).and_hms_opt(9, 0, 0).unwrap()).await;

    let response = as_developer(ctx.server.post("/api/attendance/clock-in"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clock_out_records_hours_and_percentage() {
    let ctx = TestContext::new().await;

    let opened = Attendance {
        id: uuid::Uuid::new_v4(),
        employee_id: DEVELOPER,
        date: date(2025, 6, 4),
        clocked_in: true,
        clock_in_time: date(2025, 6, 4).and_hms_opt(6, 0, 0).unwrap(),
        clocked_out: false,
        clock_out_time: None,
        work_hours: 0.0,
        percentage: 0.0,
    };
    ctx.store.add_attendance(opened).await;

    let closed: AttendanceActionResponse =
        as_developer(ctx.server.post("/api/attendance/clock-out")).await.json();

    assert!(closed.attendance.clocked_out);
    assert_eq!(closed.attendance.work_hours, 4.0);
    assert_eq!(closed.attendance.percentage, 50.0);
}

#[tokio::test]
async fn test_attendance_range_queries() {
    let ctx = TestContext::new().await;
    as_developer(ctx.server.post("/api/attendance/clock-in")).await;

    let own: Vec<Attendance> = as_developer(
        ctx.server
            .get("/api/attendance")
            .add_query_param("start", "2025-06-01")
            .add_query_param("end", "2025-06-30"),
    )
    .await
    .json();
    assert_eq!(own.len(), 1);

    let reversed = as_developer(
        ctx.server
            .get("/api/attendance")
            .add_query_param("start", "2025-06-30")
            .add_query_param("end", "2025-06-01"),
    )
    .expect_failure()
    .await;
    reversed.assert_status(StatusCode::BAD_REQUEST);

    let team: Vec<Attendance> = as_manager(
        ctx.server
            .get("/api/attendance/team")
            .add_query_param("start", "2025-06-02")
            .add_query_param("end", "2025-06-06"),
        MANAGER,
    )
    .await
    .json();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].employee_id, DEVELOPER);
}
