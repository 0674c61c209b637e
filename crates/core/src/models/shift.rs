use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::HrError;
use crate::models::employee::EmployeeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftTime {
    Morning,
    Afternoon,
    Night,
}

impl ShiftTime {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShiftTime::Morning => "Morning",
            ShiftTime::Afternoon => "Afternoon",
            ShiftTime::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftTime {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(ShiftTime::Morning),
            "Afternoon" => Ok(ShiftTime::Afternoon),
            "Night" => Ok(ShiftTime::Night),
            other => Err(HrError::Validation(format!("Invalid shift time: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: Uuid,
    pub employee_id: EmployeeId,
    pub shift_date: NaiveDate,
    pub shift_time: ShiftTime,
}

/// A shift as shown to its owner, with the status of the swap request most
/// relevant to it (a pending one first, otherwise the latest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftView {
    #[serde(flatten)]
    pub shift: Shift,
    pub swap_status: Option<SwapStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignShiftRequest {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub shift_time: ShiftTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    pub shift_time: ShiftTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl SwapStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "Pending",
            SwapStatus::Approved => "Approved",
            SwapStatus::Rejected => "Rejected",
            SwapStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(SwapStatus::Pending),
            "Approved" => Ok(SwapStatus::Approved),
            "Rejected" => Ok(SwapStatus::Rejected),
            "Cancelled" => Ok(SwapStatus::Cancelled),
            other => Err(HrError::Validation(format!("Unknown swap status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSwapRequest {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub employee_id: EmployeeId,
    pub shift_date: NaiveDate,
    pub change_from: ShiftTime,
    pub change_to: ShiftTime,
    pub status: SwapStatus,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSwapRequest {
    pub shift_id: Uuid,
    pub change_to: ShiftTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSwapRequest {
    pub change_to: ShiftTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapActionResponse {
    pub message: String,
    pub request: ShiftSwapRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftActionResponse {
    pub message: String,
    pub shifts: Vec<Shift>,
}
