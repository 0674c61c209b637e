//! Row shapes as stored in Postgres. Closed vocabularies are kept as text
//! columns and parsed back into their domain enums on the way out.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use leavedesk_core::errors::HrError;
use leavedesk_core::models::{
    attendance::Attendance,
    employee::Employee,
    holiday::Holiday,
    leave::{LeaveBalance, LeaveRequest},
    shift::{Shift, ShiftSwapRequest},
};

fn parse_column<T>(column: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = HrError>,
{
    value
        .parse()
        .map_err(|err| eyre!("Invalid value {value:?} in column {column}: {err}"))
}

/// Attendance flags are stored as 0/1 integers.
pub fn flag(value: bool) -> i16 {
    i16::from(value)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
}

impl TryFrom<DbEmployee> for Employee {
    type Error = eyre::Report;

    fn try_from(row: DbEmployee) -> Result<Self> {
        Ok(Employee {
            id: row.id,
            role: parse_column("employees.role", &row.role)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            manager_id: row.manager_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHoliday {
    pub date: NaiveDate,
    pub year: i32,
    pub description: String,
}

impl From<DbHoliday> for Holiday {
    fn from(row: DbHoliday) -> Self {
        Holiday {
            date: row.date,
            year: row.year,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLeaveBalance {
    pub employee_id: i32,
    pub year: NaiveDate,
    pub casual: i32,
    pub sick: i32,
    pub vacation: i32,
    pub medical: i32,
}

impl From<DbLeaveBalance> for LeaveBalance {
    fn from(row: DbLeaveBalance) -> Self {
        LeaveBalance {
            employee_id: row.employee_id,
            year: row.year,
            casual: row.casual,
            sick: row.sick,
            vacation: row.vacation,
            medical: row.medical,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLeaveRequest {
    pub id: Uuid,
    pub employee_id: i32,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<DbLeaveRequest> for LeaveRequest {
    type Error = eyre::Report;

    fn try_from(row: DbLeaveRequest) -> Result<Self> {
        Ok(LeaveRequest {
            id: row.id,
            employee_id: row.employee_id,
            leave_type: parse_column("leave_requests.leave_type", &row.leave_type)?,
            start_date: row.start_date,
            end_date: row.end_date,
            total_days: row.total_days,
            status: parse_column("leave_requests.status", &row.status)?,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendance {
    pub id: Uuid,
    pub employee_id: i32,
    pub date: NaiveDate,
    pub clock_in: i16,
    pub clock_in_time: NaiveDateTime,
    pub clock_out: i16,
    pub clock_out_time: Option<NaiveDateTime>,
    pub work_hours: f64,
    pub percentage: f64,
}

impl From<DbAttendance> for Attendance {
    fn from(row: DbAttendance) -> Self {
        Attendance {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            clocked_in: row.clock_in != 0,
            clock_in_time: row.clock_in_time,
            clocked_out: row.clock_out != 0,
            clock_out_time: row.clock_out_time,
            work_hours: row.work_hours,
            percentage: row.percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbShift {
    pub id: Uuid,
    pub employee_id: i32,
    pub shift_date: NaiveDate,
    pub shift_time: String,
}

impl TryFrom<DbShift> for Shift {
    type Error = eyre::Report;

    fn try_from(row: DbShift) -> Result<Self> {
        Ok(Shift {
            id: row.id,
            employee_id: row.employee_id,
            shift_date: row.shift_date,
            shift_time: parse_column("shifts.shift_time", &row.shift_time)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbShiftSwapRequest {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub employee_id: i32,
    pub shift_date: NaiveDate,
    pub change_from: String,
    pub change_to: String,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<DbShiftSwapRequest> for ShiftSwapRequest {
    type Error = eyre::Report;

    fn try_from(row: DbShiftSwapRequest) -> Result<Self> {
        Ok(ShiftSwapRequest {
            id: row.id,
            shift_id: row.shift_id,
            employee_id: row.employee_id,
            shift_date: row.shift_date,
            change_from: parse_column("shift_swap_requests.change_from", &row.change_from)?,
            change_to: parse_column("shift_swap_requests.change_to", &row.change_to)?,
            status: parse_column("shift_swap_requests.status", &row.status)?,
            updated_at: row.updated_at,
        })
    }
}

impl From<&LeaveBalance> for DbLeaveBalance {
    fn from(balance: &LeaveBalance) -> Self {
        DbLeaveBalance {
            employee_id: balance.employee_id,
            year: balance.year,
            casual: balance.casual,
            sick: balance.sick,
            vacation: balance.vacation,
            medical: balance.medical,
        }
    }
}

impl From<&LeaveRequest> for DbLeaveRequest {
    fn from(request: &LeaveRequest) -> Self {
        DbLeaveRequest {
            id: request.id,
            employee_id: request.employee_id,
            leave_type: request.leave_type.to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            total_days: request.total_days,
            status: request.status.to_string(),
            updated_at: request.updated_at,
        }
    }
}

impl From<&Attendance> for DbAttendance {
    fn from(attendance: &Attendance) -> Self {
        DbAttendance {
            id: attendance.id,
            employee_id: attendance.employee_id,
            date: attendance.date,
            clock_in: flag(attendance.clocked_in),
            clock_in_time: attendance.clock_in_time,
            clock_out: flag(attendance.clocked_out),
            clock_out_time: attendance.clock_out_time,
            work_hours: attendance.work_hours,
            percentage: attendance.percentage,
        }
    }
}

impl From<&Shift> for DbShift {
    fn from(shift: &Shift) -> Self {
        DbShift {
            id: shift.id,
            employee_id: shift.employee_id,
            shift_date: shift.shift_date,
            shift_time: shift.shift_time.to_string(),
        }
    }
}

impl From<&ShiftSwapRequest> for DbShiftSwapRequest {
    fn from(request: &ShiftSwapRequest) -> Self {
        DbShiftSwapRequest {
            id: request.id,
            shift_id: request.shift_id,
            employee_id: request.employee_id,
            shift_date: request.shift_date,
            change_from: request.change_from.to_string(),
            change_to: request.change_to.to_string(),
            status: request.status.to_string(),
            updated_at: request.updated_at,
        }
    }
}

/// Converts a batch of rows, failing on the first one that does not parse.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = eyre::Report>,
{
    rows.into_iter().map(T::try_from).collect()
}
