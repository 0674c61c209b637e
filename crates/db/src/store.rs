//! [`Store`] backed by Postgres.
//!
//! Every transaction runs at `SERIALIZABLE` isolation, so the reads a
//! workflow validates against cannot shift underneath its writes. Status
//! transitions are additionally guarded by `WHERE status = <expected>`.
//! A serialization failure surfaces as a conflict the caller may retry.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Postgres;
use uuid::Uuid;

use leavedesk_core::{
    errors::{HrError, HrResult},
    models::{
        attendance::Attendance,
        employee::{Employee, EmployeeId},
        holiday::Holiday,
        leave::{LeaveBalance, LeaveRequest, LeaveStatus},
        shift::{Shift, ShiftSwapRequest, SwapStatus},
    },
    store::{Store, Transaction},
};

use crate::models::{
    DbAttendance, DbLeaveBalance, DbLeaveRequest, DbShift, DbShiftSwapRequest, convert_all,
};
use crate::{DbPool, repositories};

const SERIALIZATION_FAILURE: &str = "40001";

/// Maps a repository failure onto the domain error, singling out lost
/// serialization races.
fn db_error(report: eyre::Report) -> HrError {
    let serialization_failure = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|err| err.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE);

    if serialization_failure {
        tracing::warn!("Transaction lost a serialization race");
        return HrError::Conflict("Concurrent update detected, please retry".to_string());
    }
    HrError::Database(report)
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub struct PgTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgTransaction;

    async fn begin(&self) -> HrResult<Self::Tx> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| db_error(err.into()))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|err| db_error(err.into()))?;

        Ok(PgTransaction { tx })
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn employee(&mut self, id: EmployeeId) -> HrResult<Option<Employee>> {
        let row = repositories::employee::get_employee_by_id(&mut self.tx, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(Employee::try_from).transpose()?)
    }

    async fn team_members(&mut self, manager_id: EmployeeId) -> HrResult<Vec<Employee>> {
        let rows = repositories::employee::get_employees_by_manager(&mut self.tx, manager_id)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn holidays_between(&mut self, start: NaiveDate, end: NaiveDate) -> HrResult<Vec<Holiday>> {
        let rows = repositories::holiday::get_holidays_between(&mut self.tx, start, end)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Holiday::from).collect())
    }

    async fn insert_holiday(&mut self, holiday: &Holiday) -> HrResult<()> {
        let created = repositories::holiday::create_holiday(
            &mut self.tx,
            holiday.date,
            holiday.year,
            &holiday.description,
        )
        .await
        .map_err(db_error)?;

        if !created {
            return Err(HrError::Conflict(format!(
                "A holiday already exists on {}",
                holiday.date
            )));
        }
        Ok(())
    }

    async fn leave_balance(
        &mut self,
        employee_id: EmployeeId,
        year: NaiveDate,
    ) -> HrResult<Option<LeaveBalance>> {
        let row = repositories::leave_balance::get_leave_balance(&mut self.tx, employee_id, year)
            .await
            .map_err(db_error)?;
        Ok(row.map(LeaveBalance::from))
    }

    async fn insert_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()> {
        let created =
            repositories::leave_balance::create_leave_balance(&mut self.tx, &DbLeaveBalance::from(balance))
                .await
                .map_err(db_error)?;

        if !created {
            return Err(HrError::Conflict("Leave balance already exists".to_string()));
        }
        Ok(())
    }

    async fn update_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()> {
        repositories::leave_balance::update_leave_balance(&mut self.tx, &DbLeaveBalance::from(balance))
            .await
            .map_err(db_error)
    }

    async fn leave_request(&mut self, id: Uuid) -> HrResult<Option<LeaveRequest>> {
        let row = repositories::leave_request::get_leave_request_by_id(&mut self.tx, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(LeaveRequest::try_from).transpose()?)
    }

    async fn employee_leave_requests(&mut self, employee_id: EmployeeId) -> HrResult<Vec<LeaveRequest>> {
        let rows = repositories::leave_request::get_leave_requests_by_employee(&mut self.tx, employee_id)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn pending_team_leave_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<LeaveRequest>> {
        let rows =
            repositories::leave_request::get_pending_team_leave_requests(&mut self.tx, manager_id, after)
                .await
                .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn insert_leave_request(&mut self, request: &LeaveRequest) -> HrResult<()> {
        repositories::leave_request::create_leave_request(&mut self.tx, &DbLeaveRequest::from(request))
            .await
            .map_err(db_error)
    }

    async fn update_leave_request_if_status(
        &mut self,
        request: &LeaveRequest,
        expected: LeaveStatus,
    ) -> HrResult<bool> {
        repositories::leave_request::update_leave_request_if_status(
            &mut self.tx,
            &DbLeaveRequest::from(request),
            expected.as_str(),
        )
        .await
        .map_err(db_error)
    }

    async fn attendance_on(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> HrResult<Option<Attendance>> {
        let row = repositories::attendance::get_attendance_on(&mut self.tx, employee_id, date)
            .await
            .map_err(db_error)?;
        Ok(row.map(Attendance::from))
    }

    async fn insert_attendance(&mut self, attendance: &Attendance) -> HrResult<()> {
        let created =
            repositories::attendance::create_attendance(&mut self.tx, &DbAttendance::from(attendance))
                .await
                .map_err(db_error)?;

        if !created {
            return Err(HrError::Conflict("Clock-In Already recorded".to_string()));
        }
        Ok(())
    }

    async fn update_attendance(&mut self, attendance: &Attendance) -> HrResult<()> {
        repositories::attendance::update_attendance(&mut self.tx, &DbAttendance::from(attendance))
            .await
            .map_err(db_error)
    }

    async fn employee_attendance_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>> {
        let rows = repositories::attendance::get_attendance_between(&mut self.tx, employee_id, start, end)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Attendance::from).collect())
    }

    async fn team_attendance_between(
        &mut self,
        manager_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>> {
        let rows =
            repositories::attendance::get_team_attendance_between(&mut self.tx, manager_id, start, end)
                .await
                .map_err(db_error)?;
        Ok(rows.into_iter().map(Attendance::from).collect())
    }

    async fn shift(&mut self, id: Uuid) -> HrResult<Option<Shift>> {
        let row = repositories::shift::get_shift_by_id(&mut self.tx, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(Shift::try_from).transpose()?)
    }

    async fn employee_shifts_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Shift>> {
        let rows = repositories::shift::get_shifts_between(&mut self.tx, employee_id, start, end)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn team_shifts_from(&mut self, manager_id: EmployeeId, from: NaiveDate) -> HrResult<Vec<Shift>> {
        let rows = repositories::shift::get_team_shifts_from(&mut self.tx, manager_id, from)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn insert_shifts(&mut self, shifts: &[Shift]) -> HrResult<()> {
        for shift in shifts {
            let created = repositories::shift::create_shift(&mut self.tx, &DbShift::from(shift))
                .await
                .map_err(db_error)?;

            // The whole batch rolls back with the transaction
            if !created {
                return Err(HrError::Conflict(format!(
                    "Employee {} already has a shift on {}",
                    shift.employee_id, shift.shift_date
                )));
            }
        }
        Ok(())
    }

    async fn update_shift(&mut self, shift: &Shift) -> HrResult<()> {
        repositories::shift::update_shift_time(&mut self.tx, shift.id, shift.shift_time.as_str())
            .await
            .map_err(db_error)
    }

    async fn swap_request(&mut self, id: Uuid) -> HrResult<Option<ShiftSwapRequest>> {
        let row = repositories::swap_request::get_swap_request_by_id(&mut self.tx, id)
            .await
            .map_err(db_error)?;
        Ok(row.map(ShiftSwapRequest::try_from).transpose()?)
    }

    async fn shift_swap_requests(&mut self, shift_id: Uuid) -> HrResult<Vec<ShiftSwapRequest>> {
        let rows = repositories::swap_request::get_swap_requests_by_shift(&mut self.tx, shift_id)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn swap_requests_for_shifts(
        &mut self,
        shift_ids: &[Uuid],
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let rows = repositories::swap_request::get_swap_requests_by_shifts(&mut self.tx, shift_ids)
            .await
            .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn employee_swap_requests_from(
        &mut self,
        employee_id: EmployeeId,
        from: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let rows =
            repositories::swap_request::get_swap_requests_by_employee_from(&mut self.tx, employee_id, from)
                .await
                .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn pending_team_swap_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let rows =
            repositories::swap_request::get_pending_team_swap_requests(&mut self.tx, manager_id, after)
                .await
                .map_err(db_error)?;
        Ok(convert_all(rows)?)
    }

    async fn insert_swap_request(&mut self, request: &ShiftSwapRequest) -> HrResult<()> {
        repositories::swap_request::create_swap_request(&mut self.tx, &DbShiftSwapRequest::from(request))
            .await
            .map_err(db_error)
    }

    async fn update_swap_request_if_status(
        &mut self,
        request: &ShiftSwapRequest,
        expected: SwapStatus,
    ) -> HrResult<bool> {
        repositories::swap_request::update_swap_request_if_status(
            &mut self.tx,
            &DbShiftSwapRequest::from(request),
            expected.as_str(),
        )
        .await
        .map_err(db_error)
    }

    async fn commit(self) -> HrResult<()> {
        self.tx.commit().await.map_err(|err| db_error(err.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_failures_stay_database_errors() {
        let err = db_error(eyre::eyre!("connection reset"));
        assert!(matches!(err, HrError::Database(_)));
    }

    #[test]
    fn row_not_found_is_not_a_conflict() {
        let err = db_error(sqlx::Error::RowNotFound.into());
        assert!(matches!(err, HrError::Database(_)));
    }
}
