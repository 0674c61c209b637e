use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::HrResult;
use crate::models::employee::{Employee, EmployeeId};
use crate::services::load_employee;
use crate::store::{Store, Transaction};

pub async fn profile<S: Store>(store: &S, employee_id: EmployeeId) -> HrResult<Employee> {
    let mut tx = store.begin().await?;
    load_employee(&mut tx, employee_id).await
}

pub async fn team_members<S: Store>(store: &S, manager_id: EmployeeId) -> HrResult<Vec<Employee>> {
    let mut tx = store.begin().await?;
    let mut members = tx.team_members(manager_id).await?;
    members.sort_by_key(|member| member.id);
    Ok(members)
}

/// Team members with an attendance row dated `today`.
pub async fn present_today<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<Employee>> {
    let mut tx = store.begin().await?;
    let present: HashSet<EmployeeId> = tx
        .team_attendance_between(manager_id, today, today)
        .await?
        .into_iter()
        .map(|row| row.employee_id)
        .collect();

    let mut members = tx.team_members(manager_id).await?;
    members.retain(|member| present.contains(&member.id));
    members.sort_by_key(|member| member.id);
    Ok(members)
}
