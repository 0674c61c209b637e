//! Persistence seam for the workflow engine.
//!
//! Every workflow operation runs inside one [`Transaction`]: reads, checks and
//! writes happen against the same snapshot, and nothing is visible to other
//! callers until [`Transaction::commit`]. Dropping a transaction without
//! committing discards its writes.
//!
//! Status transitions go through the `*_if_status` updates, which only apply
//! when the stored row still carries the expected status. They report whether
//! the row was changed so a caller racing another decision sees a conflict
//! instead of overwriting it.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::HrResult;
use crate::models::{
    attendance::Attendance,
    employee::{Employee, EmployeeId},
    holiday::Holiday,
    leave::{LeaveBalance, LeaveRequest, LeaveStatus},
    shift::{Shift, ShiftSwapRequest, SwapStatus},
};

#[async_trait]
pub trait Store: Send + Sync + 'static {
    type Tx: Transaction;

    async fn begin(&self) -> HrResult<Self::Tx>;
}

#[async_trait]
pub trait Transaction: Send {
    // Employees
    async fn employee(&mut self, id: EmployeeId) -> HrResult<Option<Employee>>;
    async fn team_members(&mut self, manager_id: EmployeeId) -> HrResult<Vec<Employee>>;

    // Holiday calendar
    async fn holidays_between(&mut self, start: NaiveDate, end: NaiveDate) -> HrResult<Vec<Holiday>>;
    async fn insert_holiday(&mut self, holiday: &Holiday) -> HrResult<()>;

    // Leave ledger
    async fn leave_balance(
        &mut self,
        employee_id: EmployeeId,
        year: NaiveDate,
    ) -> HrResult<Option<LeaveBalance>>;
    async fn insert_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()>;
    async fn update_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()>;

    // Leave requests
    async fn leave_request(&mut self, id: Uuid) -> HrResult<Option<LeaveRequest>>;
    /// All of an employee's requests, ordered by start date.
    async fn employee_leave_requests(&mut self, employee_id: EmployeeId) -> HrResult<Vec<LeaveRequest>>;
    /// Pending requests of a manager's reports starting strictly after `after`.
    async fn pending_team_leave_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<LeaveRequest>>;
    async fn insert_leave_request(&mut self, request: &LeaveRequest) -> HrResult<()>;
    async fn update_leave_request_if_status(
        &mut self,
        request: &LeaveRequest,
        expected: LeaveStatus,
    ) -> HrResult<bool>;

    // Attendance
    async fn attendance_on(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> HrResult<Option<Attendance>>;
    async fn insert_attendance(&mut self, attendance: &Attendance) -> HrResult<()>;
    async fn update_attendance(&mut self, attendance: &Attendance) -> HrResult<()>;
    async fn employee_attendance_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>>;
    async fn team_attendance_between(
        &mut self,
        manager_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>>;

    // Shifts
    async fn shift(&mut self, id: Uuid) -> HrResult<Option<Shift>>;
    async fn employee_shifts_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Shift>>;
    async fn team_shifts_from(&mut self, manager_id: EmployeeId, from: NaiveDate) -> HrResult<Vec<Shift>>;
    /// Fails with a conflict if any `(employee_id, shift_date)` is already taken.
    async fn insert_shifts(&mut self, shifts: &[Shift]) -> HrResult<()>;
    async fn update_shift(&mut self, shift: &Shift) -> HrResult<()>;

    // Swap requests
    async fn swap_request(&mut self, id: Uuid) -> HrResult<Option<ShiftSwapRequest>>;
    /// Every swap request raised against a shift, newest first.
    async fn shift_swap_requests(&mut self, shift_id: Uuid) -> HrResult<Vec<ShiftSwapRequest>>;
    /// Swap requests raised against any of `shift_ids`, newest first.
    async fn swap_requests_for_shifts(
        &mut self,
        shift_ids: &[Uuid],
    ) -> HrResult<Vec<ShiftSwapRequest>>;
    async fn employee_swap_requests_from(
        &mut self,
        employee_id: EmployeeId,
        from: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>>;
    /// Pending swaps of a manager's reports for shifts strictly after `after`.
    async fn pending_team_swap_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>>;
    async fn insert_swap_request(&mut self, request: &ShiftSwapRequest) -> HrResult<()>;
    async fn update_swap_request_if_status(
        &mut self,
        request: &ShiftSwapRequest,
        expected: SwapStatus,
    ) -> HrResult<bool>;

    async fn commit(self) -> HrResult<()>;
}
