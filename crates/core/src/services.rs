//! Workflow operations. Each one opens a single transaction on the store,
//! performs its checks and writes inside it, and commits once.

pub mod attendance;
pub mod balance;
pub mod employee;
pub mod holiday;
pub mod leave;
pub mod report;
pub mod shift;
pub mod swap;

use crate::errors::{HrError, HrResult};
use crate::models::employee::{Employee, EmployeeId};
use crate::store::Transaction;

pub(crate) async fn load_employee<T: Transaction>(
    tx: &mut T,
    employee_id: EmployeeId,
) -> HrResult<Employee> {
    tx.employee(employee_id)
        .await?
        .ok_or_else(|| HrError::NotFound(format!("Employee {employee_id} not found")))
}

/// Loads `employee_id` and checks that it reports to `manager_id`.
pub(crate) async fn load_report<T: Transaction>(
    tx: &mut T,
    manager_id: EmployeeId,
    employee_id: EmployeeId,
) -> HrResult<Employee> {
    let employee = load_employee(tx, employee_id).await?;
    if !employee.reports_to(manager_id) {
        tracing::warn!(manager_id, employee_id, "Manager does not manage employee");
        return Err(HrError::unauthorized());
    }
    Ok(employee)
}

pub(crate) fn ensure_owner(owner_id: EmployeeId, caller_id: EmployeeId) -> HrResult<()> {
    if owner_id != caller_id {
        tracing::warn!(owner_id, caller_id, "Caller does not own resource");
        return Err(HrError::unauthorized());
    }
    Ok(())
}
