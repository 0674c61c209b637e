use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::employee::EmployeeId;

/// One row per employee per calendar day. Created by clock-in and completed
/// exactly once by clock-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clocked_in: bool,
    pub clock_in_time: NaiveDateTime,
    pub clocked_out: bool,
    pub clock_out_time: Option<NaiveDateTime>,
    pub work_hours: f64,
    pub percentage: f64,
}

impl Attendance {
    pub fn is_open(&self) -> bool {
        self.clocked_in && !self.clocked_out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceActionResponse {
    pub message: String,
    pub attendance: Attendance,
}
