use pretty_assertions::assert_eq;

use leavedesk_core::{
    models::{
        holiday::CreateHolidayRequest,
        leave::{LeaveStatus, LeaveType},
        report::TeamReport,
        shift::{CreateSwapRequest, ShiftTime},
    },
    policy::LeavePolicy,
    services::{attendance, employee, holiday as holidays, report, swap},
};

mod common;
use common::*;

#[tokio::test]
async fn test_team_report_counts() {
    let store = seeded_store().await;
    let today = now().date();

    // Pending future leave counts; pending leave starting today does not
    store
        .add_leave_request(leave(DEVELOPER, LeaveType::Sick, date(2025, 6, 9), date(2025, 6, 9), LeaveStatus::Pending))
        .await;
    store
        .add_leave_request(leave(TESTER, LeaveType::Sick, today, today, LeaveStatus::Pending))
        .await;
    store
        .add_leave_request(leave(TESTER, LeaveType::Sick, date(2025, 6, 10), date(2025, 6, 10), LeaveStatus::Approved))
        .await;
    store
        .add_leave_request(leave(OUTSIDER, LeaveType::Sick, date(2025, 6, 9), date(2025, 6, 9), LeaveStatus::Pending))
        .await;

    let future_shift = shift(TESTER, date(2025, 6, 11), ShiftTime::Morning);
    store.add_shift(future_shift.clone()).await;
    swap::create(
        &store,
        TESTER,
        CreateSwapRequest {
            shift_id: future_shift.id,
            change_to: ShiftTime::Night,
        },
        now(),
    )
    .await
    .unwrap();

    attendance::clock_in(&store, DEVELOPER, at(today, 9, 0)).await.unwrap();

    let summary = report::team_report(&store, MANAGER, today).await.unwrap();
    assert_eq!(
        summary,
        TeamReport {
            total_employees: 2,
            pending_leave_requests: 1,
            pending_swap_requests: 1,
            absent_employees: 1,
        }
    );
}

#[tokio::test]
async fn test_report_for_empty_team() {
    let store = seeded_store().await;

    let summary = report::team_report(&store, DEVELOPER, now().date()).await.unwrap();

    assert_eq!(summary.total_employees, 0);
    assert_eq!(summary.absent_employees, 0);
}

#[tokio::test]
async fn test_team_directory() {
    let store = seeded_store().await;
    let today = now().date();
    attendance::clock_in(&store, TESTER, at(today, 9, 0)).await.unwrap();
    attendance::clock_out(&store, &LeavePolicy::default(), TESTER, at(today, 11, 0))
        .await
        .unwrap();

    let team = employee::team_members(&store, MANAGER).await.unwrap();
    assert_eq!(team.iter().map(|e| e.id).collect::<Vec<_>>(), vec![DEVELOPER, TESTER]);

    let present = employee::present_today(&store, MANAGER, today).await.unwrap();
    assert_eq!(present.iter().map(|e| e.id).collect::<Vec<_>>(), vec![TESTER]);

    let me = employee::profile(&store, TESTER).await.unwrap();
    assert_eq!(me.manager_id, Some(MANAGER));
    assert!(employee::profile(&store, 999).await.is_err());
}

#[tokio::test]
async fn test_holiday_calendar() {
    let store = seeded_store().await;
    for (month, day, name) in [
        (1, 1, "New Year's Day"),
        (6, 4, "Today"),
        (6, 5, "Bakrid"),
        (8, 15, "Independence Day"),
        (8, 27, "Ganesh Chaturthi"),
        (10, 2, "Gandhi Jayanti"),
        (10, 20, "Diwali"),
        (12, 25, "Christmas"),
    ] {
        store.add_holiday(holiday(date(2025, month, day), name)).await;
    }
    store.add_holiday(holiday(date(2026, 1, 1), "New Year's Day")).await;

    let annual = holidays::annual_holidays(&store, 2025).await.unwrap();
    assert_eq!(annual.len(), 8);

    let upcoming = holidays::upcoming_holidays(&store, now().date()).await.unwrap();
    assert_eq!(
        upcoming.iter().map(|h| h.date).collect::<Vec<_>>(),
        vec![
            date(2025, 6, 5),
            date(2025, 8, 15),
            date(2025, 8, 27),
            date(2025, 10, 2),
            date(2025, 10, 20),
        ]
    );

    let added = holidays::add_holiday(
        &store,
        CreateHolidayRequest {
            date: date(2025, 11, 1),
            description: "Founders Day".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(added.year, 2025);

    let duplicate = holidays::add_holiday(
        &store,
        CreateHolidayRequest {
            date: date(2025, 12, 25),
            description: "Christmas again".to_string(),
        },
    )
    .await;
    assert!(duplicate.is_err());
}
