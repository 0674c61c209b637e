use chrono::NaiveDate;
use tracing::info;

use crate::errors::HrResult;
use crate::models::{
    employee::EmployeeId,
    leave::{LeaveBalance, fiscal_year_start},
};
use crate::policy::LeavePolicy;
use crate::store::{Store, Transaction};

/// Returns the ledger for `(employee_id, year)`, opening it with the policy's
/// allotments when it does not exist yet.
pub async fn get_or_create<T: Transaction>(
    tx: &mut T,
    policy: &LeavePolicy,
    employee_id: EmployeeId,
    year: NaiveDate,
) -> HrResult<LeaveBalance> {
    if let Some(balance) = tx.leave_balance(employee_id, year).await? {
        return Ok(balance);
    }

    let balance = policy.opening_balance(employee_id, year);
    tx.insert_leave_balance(&balance).await?;
    info!(employee_id, %year, "Opened leave balance");
    Ok(balance)
}

/// Current fiscal-year ledger of an employee.
pub async fn my_balance<S: Store>(
    store: &S,
    policy: &LeavePolicy,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> HrResult<LeaveBalance> {
    let mut tx = store.begin().await?;
    let balance = get_or_create(&mut tx, policy, employee_id, fiscal_year_start(today)).await?;
    tx.commit().await?;
    Ok(balance)
}
