use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{employee::EmployeeId, leave::LeaveBalance};

/// Days granted per category when a fiscal-year ledger is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveAllotments {
    pub casual: i32,
    pub sick: i32,
    pub vacation: i32,
    pub medical: i32,
}

impl Default for LeaveAllotments {
    fn default() -> Self {
        Self {
            casual: 12,
            sick: 10,
            vacation: 15,
            medical: 10,
        }
    }
}

/// Business constants the workflows consult. Loaded from configuration by
/// the API and handed to the services explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    pub allotments: LeaveAllotments,
    /// Target hours per working day; attendance percentage is relative to it.
    pub daily_work_hours: f64,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            allotments: LeaveAllotments::default(),
            daily_work_hours: 8.0,
        }
    }
}

impl LeavePolicy {
    pub fn opening_balance(&self, employee_id: EmployeeId, year: NaiveDate) -> LeaveBalance {
        LeaveBalance {
            employee_id,
            year,
            casual: self.allotments.casual,
            sick: self.allotments.sick,
            vacation: self.allotments.vacation,
            medical: self.allotments.medical,
        }
    }
}
