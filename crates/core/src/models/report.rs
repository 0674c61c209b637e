use serde::{Deserialize, Serialize};

/// Headline numbers for a manager's team, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReport {
    pub total_employees: usize,
    pub pending_leave_requests: usize,
    pub pending_swap_requests: usize,
    pub absent_employees: usize,
}
