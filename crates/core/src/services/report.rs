use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::HrResult;
use crate::models::{employee::EmployeeId, report::TeamReport};
use crate::store::{Store, Transaction};

/// Team size, pending future leave and swap requests, and how many team
/// members have no attendance row today.
pub async fn team_report<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<TeamReport> {
    let mut tx = store.begin().await?;

    let total_employees = tx.team_members(manager_id).await?.len();
    let pending_leave_requests = tx.pending_team_leave_requests(manager_id, today).await?.len();
    let pending_swap_requests = tx.pending_team_swap_requests(manager_id, today).await?.len();
    let present = tx
        .team_attendance_between(manager_id, today, today)
        .await?
        .into_iter()
        .map(|row| row.employee_id)
        .collect::<HashSet<_>>()
        .len();

    Ok(TeamReport {
        total_employees,
        pending_leave_requests,
        pending_swap_requests,
        absent_employees: total_employees.saturating_sub(present),
    })
}
