//! Leave request lifecycle.
//!
//! ```text
//! Pending ──approve──▶ Approved
//!    │────reject───▶ Rejected
//!    └────cancel───▶ Cancelled
//! ```
//!
//! Submission and update only *check* the ledger; the balance is debited when
//! a manager approves, with a fresh check inside the approving transaction.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::count_business_days;
use crate::errors::{HrError, HrResult};
use crate::models::{
    employee::EmployeeId,
    leave::{
        LeaveRequest, LeaveStatus, LeaveType, SubmitLeaveRequest, UpdateLeaveRequest,
        fiscal_year_start,
    },
};
use crate::policy::LeavePolicy;
use crate::services::{balance, ensure_owner, load_report};
use crate::store::{Store, Transaction};

fn validate_dates(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> HrResult<()> {
    if start > end {
        return Err(HrError::Validation(
            "Invalid Dates: Start date cannot be after end date.".to_string(),
        ));
    }
    if start == today {
        return Err(HrError::Validation(
            "Leave cannot be applied for today".to_string(),
        ));
    }
    if start < today {
        return Err(HrError::Validation(
            "Invalid Dates: Leave start or end date cannot be in the past.".to_string(),
        ));
    }
    Ok(())
}

fn overlap_conflict(existing: &LeaveRequest) -> HrError {
    HrError::Conflict(format!(
        "Leave request overlaps with an existing {} request from {} to {}",
        existing.status, existing.start_date, existing.end_date
    ))
}

async fn working_days<T: Transaction>(tx: &mut T, start: NaiveDate, end: NaiveDate) -> HrResult<i32> {
    let days = count_business_days(tx, start, end).await?;
    if days <= 0 {
        return Err(HrError::Validation(
            "Enter valid dates. Total leave days calculated is zero or negative (considering weekends and holidays)."
                .to_string(),
        ));
    }
    Ok(days)
}

async fn load_request<T: Transaction>(tx: &mut T, leave_id: Uuid) -> HrResult<LeaveRequest> {
    tx.leave_request(leave_id)
        .await?
        .ok_or_else(|| HrError::NotFound("Leave request not found".to_string()))
}

fn ensure_pending(request: &LeaveRequest) -> HrResult<()> {
    if request.status != LeaveStatus::Pending {
        warn!(leave_id = %request.id, status = %request.status, "Leave request is not pending");
        return Err(HrError::not_pending("Leave request", request.status));
    }
    Ok(())
}

/// Writes a status change, failing if another transaction decided first.
async fn transition<T: Transaction>(
    tx: &mut T,
    request: &LeaveRequest,
    expected: LeaveStatus,
) -> HrResult<()> {
    if !tx.update_leave_request_if_status(request, expected).await? {
        return Err(HrError::Conflict(
            "Leave request was changed by another action".to_string(),
        ));
    }
    Ok(())
}

pub async fn submit<S: Store>(
    store: &S,
    policy: &LeavePolicy,
    employee_id: EmployeeId,
    payload: SubmitLeaveRequest,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let today = now.date();
    validate_dates(payload.start_date, payload.end_date, today)?;
    let leave_type: LeaveType = payload.leave_type.parse()?;

    let mut tx = store.begin().await?;
    let existing = tx.employee_leave_requests(employee_id).await?;

    if let Some(clash) = existing
        .iter()
        .find(|r| r.status.is_active() && r.overlaps(payload.start_date, payload.end_date))
    {
        warn!(employee_id, leave_id = %clash.id, "Leave request overlaps");
        return Err(overlap_conflict(clash));
    }

    let duplicate = existing.iter().any(|r| {
        r.status != LeaveStatus::Cancelled
            && r.leave_type == leave_type
            && r.start_date == payload.start_date
            && r.end_date == payload.end_date
    });
    if duplicate {
        return Err(HrError::Conflict(
            "A leave request for the same type and dates already exists".to_string(),
        ));
    }

    let total_days = working_days(&mut tx, payload.start_date, payload.end_date).await?;
    let ledger = balance::get_or_create(&mut tx, policy, employee_id, fiscal_year_start(today)).await?;
    ledger.ensure_available(leave_type, total_days)?;

    let request = LeaveRequest {
        id: Uuid::new_v4(),
        employee_id,
        leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        total_days,
        status: LeaveStatus::Pending,
        updated_at: now,
    };
    tx.insert_leave_request(&request).await?;
    tx.commit().await?;

    info!(employee_id, leave_id = %request.id, %leave_type, total_days, "Leave request submitted");
    Ok(request)
}

pub async fn update<S: Store>(
    store: &S,
    policy: &LeavePolicy,
    employee_id: EmployeeId,
    leave_id: Uuid,
    payload: UpdateLeaveRequest,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let today = now.date();
    let mut tx = store.begin().await?;
    let mut request = load_request(&mut tx, leave_id).await?;
    ensure_owner(request.employee_id, employee_id)?;
    ensure_pending(&request)?;

    let leave_type: LeaveType = payload.leave_type.parse()?;
    validate_dates(payload.start_date, payload.end_date, today)?;

    if request.leave_type == leave_type
        && request.start_date == payload.start_date
        && request.end_date == payload.end_date
    {
        return Err(HrError::Validation("No changes made".to_string()));
    }

    let others = tx.employee_leave_requests(employee_id).await?;
    if let Some(clash) = others.iter().find(|r| {
        r.id != leave_id && r.status.is_active() && r.overlaps(payload.start_date, payload.end_date)
    }) {
        warn!(employee_id, leave_id = %leave_id, clash = %clash.id, "Updated leave request overlaps");
        return Err(overlap_conflict(clash));
    }

    let total_days = working_days(&mut tx, payload.start_date, payload.end_date).await?;
    let ledger = balance::get_or_create(&mut tx, policy, employee_id, fiscal_year_start(today)).await?;
    ledger.ensure_available(leave_type, total_days)?;

    request.leave_type = leave_type;
    request.start_date = payload.start_date;
    request.end_date = payload.end_date;
    request.total_days = total_days;
    request.updated_at = now;
    transition(&mut tx, &request, LeaveStatus::Pending).await?;
    tx.commit().await?;

    info!(employee_id, leave_id = %leave_id, total_days, "Leave request updated");
    Ok(request)
}

pub async fn cancel<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    leave_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_request(&mut tx, leave_id).await?;
    ensure_owner(request.employee_id, employee_id)?;
    ensure_pending(&request)?;

    request.status = LeaveStatus::Cancelled;
    request.updated_at = now;
    transition(&mut tx, &request, LeaveStatus::Pending).await?;
    tx.commit().await?;

    info!(employee_id, leave_id = %leave_id, "Leave request cancelled");
    Ok(request)
}

/// Approves a pending request and debits the current fiscal-year ledger.
///
/// # Errors
///
/// * `HrError::Authorization` - the requester does not report to `manager_id`
/// * `HrError::Conflict` - the request is no longer pending
/// * `HrError::NotFound` - the request or the requester's ledger is missing
/// * `HrError::InsufficientBalance` - the ledger cannot cover `total_days`
pub async fn approve<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    leave_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_request(&mut tx, leave_id).await?;
    load_report(&mut tx, manager_id, request.employee_id).await?;
    ensure_pending(&request)?;

    let year = fiscal_year_start(now.date());
    let mut ledger = tx
        .leave_balance(request.employee_id, year)
        .await?
        .ok_or_else(|| HrError::NotFound("Leave balance missing".to_string()))?;

    if let Err(err) = ledger.debit(request.leave_type, request.total_days) {
        warn!(leave_id = %leave_id, %err, "Leave approval refused");
        return Err(err);
    }
    tx.update_leave_balance(&ledger).await?;

    request.status = LeaveStatus::Approved;
    request.updated_at = now;
    transition(&mut tx, &request, LeaveStatus::Pending).await?;
    tx.commit().await?;

    info!(
        manager_id,
        leave_id = %leave_id,
        leave_type = %request.leave_type,
        days = request.total_days,
        "Leave request approved"
    );
    Ok(request)
}

pub async fn reject<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    leave_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_request(&mut tx, leave_id).await?;
    load_report(&mut tx, manager_id, request.employee_id).await?;
    ensure_pending(&request)?;

    request.status = LeaveStatus::Rejected;
    request.updated_at = now;
    transition(&mut tx, &request, LeaveStatus::Pending).await?;
    tx.commit().await?;

    info!(manager_id, leave_id = %leave_id, "Leave request rejected");
    Ok(request)
}

/// The employee's requests that end today or later, by start date.
pub async fn my_requests<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<LeaveRequest>> {
    let mut tx = store.begin().await?;
    let mut requests = tx.employee_leave_requests(employee_id).await?;
    requests.retain(|r| r.end_date >= today);
    Ok(requests)
}

pub async fn team_pending<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<LeaveRequest>> {
    let mut tx = store.begin().await?;
    tx.pending_team_leave_requests(manager_id, today).await
}
