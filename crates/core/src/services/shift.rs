//! Manager-driven shift assignment and the employee's shift listing.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{days_between, holiday_dates, is_business_day};
use crate::errors::{HrError, HrResult};
use crate::models::{
    employee::EmployeeId,
    shift::{AssignShiftRequest, Shift, ShiftSwapRequest, ShiftView, SwapStatus, UpdateShiftRequest},
};
use crate::services::load_report;
use crate::store::{Store, Transaction};

/// Shifts created by one assignment.
pub const SHIFT_BATCH: usize = 5;
/// Calendar days scanned looking for free business days.
pub const SCAN_DAYS: i64 = 30;

/// Picks the first `SHIFT_BATCH` dates from `start` on that are business days
/// and not already `taken`, looking no further than `SCAN_DAYS` days ahead.
/// Returns `None` when the window runs out first.
pub fn plan_shift_dates(
    start: NaiveDate,
    holidays: &HashSet<NaiveDate>,
    taken: &HashSet<NaiveDate>,
) -> Option<Vec<NaiveDate>> {
    let last = start + Duration::days(SCAN_DAYS - 1);
    let dates: Vec<NaiveDate> = days_between(start, last)
        .filter(|day| is_business_day(*day, holidays) && !taken.contains(day))
        .take(SHIFT_BATCH)
        .collect();

    (dates.len() == SHIFT_BATCH).then_some(dates)
}

pub async fn assign<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    payload: AssignShiftRequest,
    today: NaiveDate,
) -> HrResult<Vec<Shift>> {
    let mut tx = store.begin().await?;
    load_report(&mut tx, manager_id, payload.employee_id).await?;

    if payload.start_date <= today {
        return Err(HrError::Validation(
            "Cannot Assign Shifts for Today or Past Dates".to_string(),
        ));
    }

    let last = payload.start_date + Duration::days(SCAN_DAYS - 1);
    let taken: HashSet<NaiveDate> = tx
        .employee_shifts_between(payload.employee_id, payload.start_date, last)
        .await?
        .into_iter()
        .map(|shift| shift.shift_date)
        .collect();
    if taken.contains(&payload.start_date) {
        return Err(HrError::Conflict(format!(
            "Shift already assigned on {}",
            payload.start_date
        )));
    }

    let holidays = holiday_dates(&mut tx, payload.start_date, last).await?;
    let Some(dates) = plan_shift_dates(payload.start_date, &holidays, &taken) else {
        warn!(employee_id = payload.employee_id, start = %payload.start_date, "No room for a full shift batch");
        return Err(HrError::Conflict(format!(
            "No {SHIFT_BATCH} free working days within {SCAN_DAYS} days of {}",
            payload.start_date
        )));
    };

    let shifts: Vec<Shift> = dates
        .into_iter()
        .map(|shift_date| Shift {
            id: Uuid::new_v4(),
            employee_id: payload.employee_id,
            shift_date,
            shift_time: payload.shift_time,
        })
        .collect();
    tx.insert_shifts(&shifts).await?;
    tx.commit().await?;

    info!(
        manager_id,
        employee_id = payload.employee_id,
        shift_time = %payload.shift_time,
        "Assigned {} shifts",
        shifts.len()
    );
    Ok(shifts)
}

pub async fn update<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    shift_id: Uuid,
    payload: UpdateShiftRequest,
    today: NaiveDate,
) -> HrResult<Shift> {
    let mut tx = store.begin().await?;
    let mut shift = tx
        .shift(shift_id)
        .await?
        .ok_or_else(|| HrError::NotFound("Shift not found".to_string()))?;
    load_report(&mut tx, manager_id, shift.employee_id).await?;

    if shift.shift_date == today {
        return Err(HrError::Validation("Cannot Update Today's Shift".to_string()));
    }
    if shift.shift_time == payload.shift_time {
        return Err(HrError::Validation("Shift time unchanged".to_string()));
    }

    shift.shift_time = payload.shift_time;
    tx.update_shift(&shift).await?;
    tx.commit().await?;

    info!(manager_id, shift_id = %shift_id, shift_time = %shift.shift_time, "Shift updated");
    Ok(shift)
}

/// The swap status worth showing next to a shift: a pending request wins,
/// otherwise the latest one. `requests` is ordered newest first.
fn relevant_swap_status(requests: &[ShiftSwapRequest]) -> Option<SwapStatus> {
    requests
        .iter()
        .find(|r| r.status == SwapStatus::Pending)
        .or_else(|| requests.first())
        .map(|r| r.status)
}

pub async fn my_shifts<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<ShiftView>> {
    let mut tx = store.begin().await?;
    let shifts = tx
        .employee_shifts_between(employee_id, today, NaiveDate::MAX)
        .await?;

    let shift_ids: Vec<Uuid> = shifts.iter().map(|shift| shift.id).collect();
    let mut by_shift: HashMap<Uuid, Vec<ShiftSwapRequest>> = HashMap::new();
    for request in tx.swap_requests_for_shifts(&shift_ids).await? {
        by_shift.entry(request.shift_id).or_default().push(request);
    }

    let views = shifts
        .into_iter()
        .map(|shift| ShiftView {
            swap_status: by_shift
                .get(&shift.id)
                .and_then(|requests| relevant_swap_status(requests)),
            shift,
        })
        .collect();
    Ok(views)
}

pub async fn team_shifts<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<Shift>> {
    let mut tx = store.begin().await?;
    tx.team_shifts_from(manager_id, today).await
}
