use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{is_working_day, work_week};
use crate::errors::{HrError, HrResult};
use crate::models::{attendance::Attendance, employee::EmployeeId, leave::LeaveStatus};
use crate::policy::LeavePolicy;
use crate::store::{Store, Transaction};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hours between the two instants, rounded to two decimals.
pub fn work_hours(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> f64 {
    let seconds = (clock_out - clock_in).num_seconds() as f64;
    round2(seconds / 3600.0)
}

/// `work_hours` as a share of the daily target, rounded to two decimals.
/// A non-positive target yields 0.
pub fn work_percentage(work_hours: f64, daily_target: f64) -> f64 {
    if daily_target <= 0.0 {
        return 0.0;
    }
    round2(work_hours / daily_target * 100.0)
}

async fn ensure_working_day<T: Transaction>(tx: &mut T, today: NaiveDate) -> HrResult<()> {
    if !is_working_day(tx, today).await? {
        return Err(HrError::Validation("Today is a holiday or weekend".to_string()));
    }
    Ok(())
}

pub async fn clock_in<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    now: NaiveDateTime,
) -> HrResult<Attendance> {
    let today = now.date();
    let mut tx = store.begin().await?;
    ensure_working_day(&mut tx, today).await?;

    let on_leave = tx
        .employee_leave_requests(employee_id)
        .await?
        .iter()
        .any(|r| r.status == LeaveStatus::Approved && r.covers(today));
    if on_leave {
        warn!(employee_id, %today, "Clock-in refused, employee on leave");
        return Err(HrError::Conflict("You are on leave today".to_string()));
    }

    if let Some(existing) = tx.attendance_on(employee_id, today).await? {
        if existing.clocked_in {
            return Err(HrError::Conflict("Clock-In Already recorded".to_string()));
        }
    }

    let attendance = Attendance {
        id: Uuid::new_v4(),
        employee_id,
        date: today,
        clocked_in: true,
        clock_in_time: now,
        clocked_out: false,
        clock_out_time: None,
        work_hours: 0.0,
        percentage: 0.0,
    };
    tx.insert_attendance(&attendance).await?;
    tx.commit().await?;

    info!(employee_id, %today, "Clocked in");
    Ok(attendance)
}

pub async fn clock_out<S: Store>(
    store: &S,
    policy: &LeavePolicy,
    employee_id: EmployeeId,
    now: NaiveDateTime,
) -> HrResult<Attendance> {
    let today = now.date();
    let mut tx = store.begin().await?;
    ensure_working_day(&mut tx, today).await?;

    let mut attendance = match tx.attendance_on(employee_id, today).await? {
        Some(row) if row.is_open() => row,
        Some(row) if row.clocked_out => {
            return Err(HrError::Conflict("Clock-Out Already Marked".to_string()));
        }
        _ => return Err(HrError::NotFound("No Attendance Record Found".to_string())),
    };

    attendance.clocked_out = true;
    attendance.clock_out_time = Some(now);
    attendance.work_hours = work_hours(attendance.clock_in_time, now);
    attendance.percentage = work_percentage(attendance.work_hours, policy.daily_work_hours);
    tx.update_attendance(&attendance).await?;
    tx.commit().await?;

    info!(
        employee_id,
        %today,
        work_hours = attendance.work_hours,
        percentage = attendance.percentage,
        "Clocked out"
    );
    Ok(attendance)
}

/// Attendance rows for the Monday..Friday window containing `today`.
pub async fn week<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<Attendance>> {
    let (monday, friday) = work_week(today);
    let mut tx = store.begin().await?;
    tx.employee_attendance_between(employee_id, monday, friday).await
}

pub async fn between<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
) -> HrResult<Vec<Attendance>> {
    if start > end {
        return Err(HrError::Validation("Invalid Date Range".to_string()));
    }
    let mut tx = store.begin().await?;
    tx.employee_attendance_between(employee_id, start, end).await
}

pub async fn team_between<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> HrResult<Vec<Attendance>> {
    if start > today || start > end {
        return Err(HrError::Validation("Please check Date Range".to_string()));
    }
    let mut tx = store.begin().await?;
    tx.team_attendance_between(manager_id, start, end).await
}
