use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::{HrError, HrResult};
use crate::models::employee::EmployeeId;

/// The four leave categories tracked by the ledger.
///
/// Parsing is case-insensitive (`"casual"`, `"CASUAL"` and `"Casual"` are the
/// same category); display and serialization use the title-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LeaveType {
    Casual,
    Sick,
    Vacation,
    Medical,
}

impl LeaveType {
    pub const ALL: [LeaveType; 4] = [
        LeaveType::Casual,
        LeaveType::Sick,
        LeaveType::Vacation,
        LeaveType::Medical,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Casual => "Casual",
            LeaveType::Sick => "Sick",
            LeaveType::Vacation => "Vacation",
            LeaveType::Medical => "Medical",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(HrError::Validation("Leave type cannot be empty".to_string()));
        }
        match trimmed.to_lowercase().as_str() {
            "casual" => Ok(LeaveType::Casual),
            "sick" => Ok(LeaveType::Sick),
            "vacation" => Ok(LeaveType::Vacation),
            "medical" => Ok(LeaveType::Medical),
            _ => Err(HrError::Validation(format!("Invalid leave type: {s}"))),
        }
    }
}

impl TryFrom<String> for LeaveType {
    type Error = HrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LeaveType> for String {
    fn from(value: LeaveType) -> Self {
        value.as_str().to_string()
    }
}

/// Lifecycle of a leave request. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }

    /// Requests in these states still hold their dates and take part in
    /// overlap detection.
    pub const fn is_active(&self) -> bool {
        !matches!(self, LeaveStatus::Rejected | LeaveStatus::Cancelled)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(LeaveStatus::Pending),
            "Approved" => Ok(LeaveStatus::Approved),
            "Rejected" => Ok(LeaveStatus::Rejected),
            "Cancelled" => Ok(LeaveStatus::Cancelled),
            other => Err(HrError::Validation(format!("Unknown leave status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: EmployeeId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub status: LeaveStatus,
    pub updated_at: NaiveDateTime,
}

impl LeaveRequest {
    /// Inclusive range intersection with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitLeaveRequest {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveRequest {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveActionResponse {
    pub message: String,
    pub request: LeaveRequest,
}

/// Per-employee, per-fiscal-year leave counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub employee_id: EmployeeId,
    /// April 1 of the fiscal year this ledger covers.
    pub year: NaiveDate,
    pub casual: i32,
    pub sick: i32,
    pub vacation: i32,
    pub medical: i32,
}

impl LeaveBalance {
    pub fn available(&self, leave_type: LeaveType) -> i32 {
        match leave_type {
            LeaveType::Casual => self.casual,
            LeaveType::Sick => self.sick,
            LeaveType::Vacation => self.vacation,
            LeaveType::Medical => self.medical,
        }
    }

    fn counter_mut(&mut self, leave_type: LeaveType) -> &mut i32 {
        match leave_type {
            LeaveType::Casual => &mut self.casual,
            LeaveType::Sick => &mut self.sick,
            LeaveType::Vacation => &mut self.vacation,
            LeaveType::Medical => &mut self.medical,
        }
    }

    /// Fails without touching the counter when `days` exceeds what is left.
    pub fn ensure_available(&self, leave_type: LeaveType, days: i32) -> HrResult<()> {
        let available = self.available(leave_type);
        if days > available {
            return Err(HrError::InsufficientBalance {
                leave_type,
                available,
                requested: days,
            });
        }
        Ok(())
    }

    pub fn debit(&mut self, leave_type: LeaveType, days: i32) -> HrResult<()> {
        self.ensure_available(leave_type, days)?;
        *self.counter_mut(leave_type) -= days;
        Ok(())
    }
}

/// April 1 starting the fiscal year that contains `today`.
pub fn fiscal_year_start(today: NaiveDate) -> NaiveDate {
    let year = if today.month() >= 4 {
        today.year()
    } else {
        today.year() - 1
    };
    // April 1 exists in every year
    NaiveDate::from_ymd_opt(year, 4, 1).unwrap_or(today)
}
