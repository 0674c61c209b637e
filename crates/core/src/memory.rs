//! In-process [`Store`] backing the workflow and HTTP tests.
//!
//! A transaction holds the store's lock for its whole lifetime and works on a
//! private copy of the state, so transactions are fully serialized and an
//! uncommitted transaction leaves no trace.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::errors::{HrError, HrResult};
use crate::models::{
    attendance::Attendance,
    employee::{Employee, EmployeeId},
    holiday::Holiday,
    leave::{LeaveBalance, LeaveRequest, LeaveStatus},
    shift::{Shift, ShiftSwapRequest, SwapStatus},
};
use crate::store::{Store, Transaction};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub employees: BTreeMap<EmployeeId, Employee>,
    pub holidays: BTreeMap<NaiveDate, Holiday>,
    pub balances: HashMap<(EmployeeId, NaiveDate), LeaveBalance>,
    pub leave_requests: HashMap<Uuid, LeaveRequest>,
    pub attendance: HashMap<Uuid, Attendance>,
    pub shifts: HashMap<Uuid, Shift>,
    pub swap_requests: HashMap<Uuid, ShiftSwapRequest>,
}

impl MemoryState {
    fn reports_to(&self, employee_id: EmployeeId, manager_id: EmployeeId) -> bool {
        self.employees
            .get(&employee_id)
            .is_some_and(|employee| employee.reports_to(manager_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: MemoryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn add_employee(&self, employee: Employee) {
        self.state.lock().await.employees.insert(employee.id, employee);
    }

    pub async fn add_holiday(&self, holiday: Holiday) {
        self.state.lock().await.holidays.insert(holiday.date, holiday);
    }

    pub async fn add_leave_balance(&self, balance: LeaveBalance) {
        self.state
            .lock()
            .await
            .balances
            .insert((balance.employee_id, balance.year), balance);
    }

    pub async fn add_leave_request(&self, request: LeaveRequest) {
        self.state.lock().await.leave_requests.insert(request.id, request);
    }

    pub async fn add_attendance(&self, attendance: Attendance) {
        self.state.lock().await.attendance.insert(attendance.id, attendance);
    }

    pub async fn add_shift(&self, shift: Shift) {
        self.state.lock().await.shifts.insert(shift.id, shift);
    }

    pub async fn add_swap_request(&self, request: ShiftSwapRequest) {
        self.state.lock().await.swap_requests.insert(request.id, request);
    }

    /// Copy of the committed state.
    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> HrResult<Self::Tx> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn employee(&mut self, id: EmployeeId) -> HrResult<Option<Employee>> {
        Ok(self.working.employees.get(&id).cloned())
    }

    async fn team_members(&mut self, manager_id: EmployeeId) -> HrResult<Vec<Employee>> {
        Ok(self
            .working
            .employees
            .values()
            .filter(|employee| employee.reports_to(manager_id))
            .cloned()
            .collect())
    }

    async fn holidays_between(&mut self, start: NaiveDate, end: NaiveDate) -> HrResult<Vec<Holiday>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.working.holidays.range(start..=end).map(|(_, h)| h.clone()).collect())
    }

    async fn insert_holiday(&mut self, holiday: &Holiday) -> HrResult<()> {
        if self.working.holidays.contains_key(&holiday.date) {
            return Err(HrError::Conflict(format!(
                "A holiday already exists on {}",
                holiday.date
            )));
        }
        self.working.holidays.insert(holiday.date, holiday.clone());
        Ok(())
    }

    async fn leave_balance(
        &mut self,
        employee_id: EmployeeId,
        year: NaiveDate,
    ) -> HrResult<Option<LeaveBalance>> {
        Ok(self.working.balances.get(&(employee_id, year)).cloned())
    }

    async fn insert_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()> {
        let key = (balance.employee_id, balance.year);
        if self.working.balances.contains_key(&key) {
            return Err(HrError::Conflict("Leave balance already exists".to_string()));
        }
        self.working.balances.insert(key, balance.clone());
        Ok(())
    }

    async fn update_leave_balance(&mut self, balance: &LeaveBalance) -> HrResult<()> {
        match self.working.balances.get_mut(&(balance.employee_id, balance.year)) {
            Some(stored) => {
                *stored = balance.clone();
                Ok(())
            }
            None => Err(HrError::NotFound("Leave balance missing".to_string())),
        }
    }

    async fn leave_request(&mut self, id: Uuid) -> HrResult<Option<LeaveRequest>> {
        Ok(self.working.leave_requests.get(&id).cloned())
    }

    async fn employee_leave_requests(&mut self, employee_id: EmployeeId) -> HrResult<Vec<LeaveRequest>> {
        let requests: Vec<LeaveRequest> = self
            .working
            .leave_requests
            .values()
            .filter(|request| request.employee_id == employee_id)
            .cloned()
            .collect();
        Ok(sorted_by(requests, |r| (r.start_date, r.updated_at)))
    }

    async fn pending_team_leave_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<LeaveRequest>> {
        let requests: Vec<LeaveRequest> = self
            .working
            .leave_requests
            .values()
            .filter(|r| r.status == LeaveStatus::Pending && r.start_date > after)
            .filter(|r| self.working.reports_to(r.employee_id, manager_id))
            .cloned()
            .collect();
        Ok(sorted_by(requests, |r| (r.start_date, r.employee_id)))
    }

    async fn insert_leave_request(&mut self, request: &LeaveRequest) -> HrResult<()> {
        self.working.leave_requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_leave_request_if_status(
        &mut self,
        request: &LeaveRequest,
        expected: LeaveStatus,
    ) -> HrResult<bool> {
        match self.working.leave_requests.get_mut(&request.id) {
            Some(stored) if stored.status == expected => {
                *stored = request.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn attendance_on(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> HrResult<Option<Attendance>> {
        Ok(self
            .working
            .attendance
            .values()
            .find(|a| a.employee_id == employee_id && a.date == date)
            .cloned())
    }

    async fn insert_attendance(&mut self, attendance: &Attendance) -> HrResult<()> {
        let taken = self
            .working
            .attendance
            .values()
            .any(|a| a.employee_id == attendance.employee_id && a.date == attendance.date);
        if taken {
            return Err(HrError::Conflict("Clock-In Already Marked".to_string()));
        }
        self.working.attendance.insert(attendance.id, attendance.clone());
        Ok(())
    }

    async fn update_attendance(&mut self, attendance: &Attendance) -> HrResult<()> {
        match self.working.attendance.get_mut(&attendance.id) {
            Some(stored) => {
                *stored = attendance.clone();
                Ok(())
            }
            None => Err(HrError::NotFound("No Attendance Record Found".to_string())),
        }
    }

    async fn employee_attendance_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>> {
        let rows: Vec<Attendance> = self
            .working
            .attendance
            .values()
            .filter(|a| a.employee_id == employee_id && a.date >= start && a.date <= end)
            .cloned()
            .collect();
        Ok(sorted_by(rows, |a| a.date))
    }

    async fn team_attendance_between(
        &mut self,
        manager_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Attendance>> {
        let rows: Vec<Attendance> = self
            .working
            .attendance
            .values()
            .filter(|a| a.date >= start && a.date <= end)
            .filter(|a| self.working.reports_to(a.employee_id, manager_id))
            .cloned()
            .collect();
        Ok(sorted_by(rows, |a| (a.date, a.employee_id)))
    }

    async fn shift(&mut self, id: Uuid) -> HrResult<Option<Shift>> {
        Ok(self.working.shifts.get(&id).cloned())
    }

    async fn employee_shifts_between(
        &mut self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HrResult<Vec<Shift>> {
        let shifts: Vec<Shift> = self
            .working
            .shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.shift_date >= start && s.shift_date <= end)
            .cloned()
            .collect();
        Ok(sorted_by(shifts, |s| s.shift_date))
    }

    async fn team_shifts_from(&mut self, manager_id: EmployeeId, from: NaiveDate) -> HrResult<Vec<Shift>> {
        let shifts: Vec<Shift> = self
            .working
            .shifts
            .values()
            .filter(|s| s.shift_date >= from)
            .filter(|s| self.working.reports_to(s.employee_id, manager_id))
            .cloned()
            .collect();
        Ok(sorted_by(shifts, |s| (s.shift_date, s.employee_id)))
    }

    async fn insert_shifts(&mut self, shifts: &[Shift]) -> HrResult<()> {
        for shift in shifts {
            let taken = self
                .working
                .shifts
                .values()
                .any(|s| s.employee_id == shift.employee_id && s.shift_date == shift.shift_date);
            if taken {
                return Err(HrError::Conflict(format!(
                    "Employee {} already has a shift on {}",
                    shift.employee_id, shift.shift_date
                )));
            }
            self.working.shifts.insert(shift.id, shift.clone());
        }
        Ok(())
    }

    async fn update_shift(&mut self, shift: &Shift) -> HrResult<()> {
        match self.working.shifts.get_mut(&shift.id) {
            Some(stored) => {
                *stored = shift.clone();
                Ok(())
            }
            None => Err(HrError::NotFound("Shift not found".to_string())),
        }
    }

    async fn swap_request(&mut self, id: Uuid) -> HrResult<Option<ShiftSwapRequest>> {
        Ok(self.working.swap_requests.get(&id).cloned())
    }

    async fn shift_swap_requests(&mut self, shift_id: Uuid) -> HrResult<Vec<ShiftSwapRequest>> {
        let mut requests: Vec<ShiftSwapRequest> = self
            .working
            .swap_requests
            .values()
            .filter(|r| r.shift_id == shift_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(requests)
    }

    async fn swap_requests_for_shifts(
        &mut self,
        shift_ids: &[Uuid],
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let mut requests: Vec<ShiftSwapRequest> = self
            .working
            .swap_requests
            .values()
            .filter(|r| shift_ids.contains(&r.shift_id))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(requests)
    }

    async fn employee_swap_requests_from(
        &mut self,
        employee_id: EmployeeId,
        from: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let requests: Vec<ShiftSwapRequest> = self
            .working
            .swap_requests
            .values()
            .filter(|r| r.employee_id == employee_id && r.shift_date >= from)
            .cloned()
            .collect();
        Ok(sorted_by(requests, |r| (r.shift_date, r.updated_at)))
    }

    async fn pending_team_swap_requests(
        &mut self,
        manager_id: EmployeeId,
        after: NaiveDate,
    ) -> HrResult<Vec<ShiftSwapRequest>> {
        let requests: Vec<ShiftSwapRequest> = self
            .working
            .swap_requests
            .values()
            .filter(|r| r.status == SwapStatus::Pending && r.shift_date > after)
            .filter(|r| self.working.reports_to(r.employee_id, manager_id))
            .cloned()
            .collect();
        Ok(sorted_by(requests, |r| (r.shift_date, r.employee_id)))
    }

    async fn insert_swap_request(&mut self, request: &ShiftSwapRequest) -> HrResult<()> {
        self.working.swap_requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_swap_request_if_status(
        &mut self,
        request: &ShiftSwapRequest,
        expected: SwapStatus,
    ) -> HrResult<bool> {
        match self.working.swap_requests.get_mut(&request.id) {
            Some(stored) if stored.status == expected => {
                *stored = request.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(mut self) -> HrResult<()> {
        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
