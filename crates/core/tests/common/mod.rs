#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fake::{
    Fake,
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
    },
};
use leavedesk_core::{
    memory::InMemoryStore,
    models::{
        employee::{Employee, EmployeeId, Role},
        holiday::Holiday,
        leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType},
        shift::{Shift, ShiftTime},
    },
    policy::LeavePolicy,
};
use uuid::Uuid;

pub const MANAGER: EmployeeId = 1;
pub const DEVELOPER: EmployeeId = 2;
pub const TESTER: EmployeeId = 3;
pub const OTHER_MANAGER: EmployeeId = 10;
pub const OUTSIDER: EmployeeId = 11;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_hms_opt(h, m, 0).unwrap()
}

/// Wednesday 2025-06-04, 10:00.
pub fn now() -> NaiveDateTime {
    at(date(2025, 6, 4), 10, 0)
}

pub fn employee(id: EmployeeId, role: Role, manager_id: Option<EmployeeId>) -> Employee {
    Employee {
        id,
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: SafeEmail().fake(),
        role,
        manager_id,
    }
}

/// Two teams: `MANAGER` leads `DEVELOPER` and `TESTER`; `OTHER_MANAGER` leads `OUTSIDER`.
pub async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.add_employee(employee(MANAGER, Role::Manager, None)).await;
    store
        .add_employee(employee(DEVELOPER, Role::Developer, Some(MANAGER)))
        .await;
    store
        .add_employee(employee(TESTER, Role::Tester, Some(MANAGER)))
        .await;
    store
        .add_employee(employee(OTHER_MANAGER, Role::Manager, None))
        .await;
    store
        .add_employee(employee(OUTSIDER, Role::NetworkEngineer, Some(OTHER_MANAGER)))
        .await;
    store
}

pub fn holiday(day: NaiveDate, description: &str) -> Holiday {
    Holiday {
        date: day,
        year: chrono::Datelike::year(&day),
        description: description.to_string(),
    }
}

pub fn fiscal_balance(employee_id: EmployeeId, casual: i32) -> LeaveBalance {
    let mut balance = LeavePolicy::default().opening_balance(employee_id, date(2025, 4, 1));
    balance.casual = casual;
    balance
}

pub fn leave(
    employee_id: EmployeeId,
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
    status: LeaveStatus,
) -> LeaveRequest {
    LeaveRequest {
        id: Uuid::new_v4(),
        employee_id,
        leave_type,
        start_date: start,
        end_date: end,
        total_days: 1,
        status,
        updated_at: at(date(2025, 6, 1), 9, 0),
    }
}

pub fn shift(employee_id: EmployeeId, day: NaiveDate, shift_time: ShiftTime) -> Shift {
    Shift {
        id: Uuid::new_v4(),
        employee_id,
        shift_date: day,
        shift_time,
    }
}
