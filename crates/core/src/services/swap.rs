//! Shift swap requests. A swap only changes the underlying shift when a
//! manager approves it; rejecting or cancelling leaves the shift untouched.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{HrError, HrResult};
use crate::models::{
    employee::EmployeeId,
    shift::{CreateSwapRequest, ShiftSwapRequest, SwapStatus, UpdateSwapRequest},
};
use crate::services::{ensure_owner, load_report};
use crate::store::{Store, Transaction};

async fn load_swap<T: Transaction>(tx: &mut T, swap_id: Uuid) -> HrResult<ShiftSwapRequest> {
    tx.swap_request(swap_id)
        .await?
        .ok_or_else(|| HrError::NotFound("Swap request not found".to_string()))
}

fn ensure_pending(request: &ShiftSwapRequest) -> HrResult<()> {
    if request.status != SwapStatus::Pending {
        warn!(swap_id = %request.id, status = %request.status, "Swap request is not pending");
        return Err(HrError::not_pending("Swap request", request.status));
    }
    Ok(())
}

async fn transition<T: Transaction>(tx: &mut T, request: &ShiftSwapRequest) -> HrResult<()> {
    if !tx
        .update_swap_request_if_status(request, SwapStatus::Pending)
        .await?
    {
        return Err(HrError::Conflict(
            "Swap request was changed by another action".to_string(),
        ));
    }
    Ok(())
}

pub async fn create<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    payload: CreateSwapRequest,
    now: NaiveDateTime,
) -> HrResult<ShiftSwapRequest> {
    let mut tx = store.begin().await?;
    let shift = tx
        .shift(payload.shift_id)
        .await?
        .ok_or_else(|| HrError::NotFound("Shift not found".to_string()))?;
    ensure_owner(shift.employee_id, employee_id)?;

    if shift.shift_date == now.date() {
        return Err(HrError::Validation("Can't Request for Today's Shift".to_string()));
    }

    let already_requested = tx
        .shift_swap_requests(shift.id)
        .await?
        .iter()
        .any(|r| r.status != SwapStatus::Cancelled);
    if already_requested {
        return Err(HrError::Conflict("Swap already requested".to_string()));
    }

    let request = ShiftSwapRequest {
        id: Uuid::new_v4(),
        shift_id: shift.id,
        employee_id,
        shift_date: shift.shift_date,
        change_from: shift.shift_time,
        change_to: payload.change_to,
        status: SwapStatus::Pending,
        updated_at: now,
    };
    tx.insert_swap_request(&request).await?;
    tx.commit().await?;

    info!(
        employee_id,
        swap_id = %request.id,
        from = %request.change_from,
        to = %request.change_to,
        "Shift swap requested"
    );
    Ok(request)
}

pub async fn update<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    swap_id: Uuid,
    payload: UpdateSwapRequest,
    now: NaiveDateTime,
) -> HrResult<ShiftSwapRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_swap(&mut tx, swap_id).await?;
    ensure_owner(request.employee_id, employee_id)?;
    ensure_pending(&request)?;

    if request.shift_date == now.date() {
        return Err(HrError::Validation("Cannot update shift for Today".to_string()));
    }
    if payload.change_to == request.change_to || payload.change_to == request.change_from {
        return Err(HrError::Validation("No changes made".to_string()));
    }

    request.change_to = payload.change_to;
    request.updated_at = now;
    transition(&mut tx, &request).await?;
    tx.commit().await?;

    info!(employee_id, swap_id = %swap_id, to = %request.change_to, "Shift swap updated");
    Ok(request)
}

pub async fn cancel<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    swap_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<ShiftSwapRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_swap(&mut tx, swap_id).await?;
    ensure_owner(request.employee_id, employee_id)?;
    ensure_pending(&request)?;

    request.status = SwapStatus::Cancelled;
    request.updated_at = now;
    transition(&mut tx, &request).await?;
    tx.commit().await?;

    info!(employee_id, swap_id = %swap_id, "Shift swap cancelled");
    Ok(request)
}

/// Approves a pending swap and moves the referenced shift to `change_to` in
/// the same transaction.
pub async fn approve<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    swap_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<ShiftSwapRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_swap(&mut tx, swap_id).await?;
    load_report(&mut tx, manager_id, request.employee_id).await?;
    ensure_pending(&request)?;

    let mut shift = tx
        .shift(request.shift_id)
        .await?
        .ok_or_else(|| HrError::NotFound("Associated shift not found".to_string()))?;

    request.status = SwapStatus::Approved;
    request.updated_at = now;
    transition(&mut tx, &request).await?;

    shift.shift_time = request.change_to;
    tx.update_shift(&shift).await?;
    tx.commit().await?;

    info!(
        manager_id,
        swap_id = %swap_id,
        shift_id = %shift.id,
        shift_time = %shift.shift_time,
        "Shift swap approved"
    );
    Ok(request)
}

pub async fn reject<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    swap_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<ShiftSwapRequest> {
    let mut tx = store.begin().await?;
    let mut request = load_swap(&mut tx, swap_id).await?;
    load_report(&mut tx, manager_id, request.employee_id).await?;
    ensure_pending(&request)?;

    request.status = SwapStatus::Rejected;
    request.updated_at = now;
    transition(&mut tx, &request).await?;
    tx.commit().await?;

    info!(manager_id, swap_id = %swap_id, "Shift swap rejected");
    Ok(request)
}

pub async fn my_requests<S: Store>(
    store: &S,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<ShiftSwapRequest>> {
    let mut tx = store.begin().await?;
    tx.employee_swap_requests_from(employee_id, today).await
}

pub async fn team_pending<S: Store>(
    store: &S,
    manager_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<Vec<ShiftSwapRequest>> {
    let mut tx = store.begin().await?;
    tx.pending_team_swap_requests(manager_id, today).await
}
