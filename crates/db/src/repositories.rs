//! Per-table query functions. Each takes a connection so it can run inside
//! the caller's transaction.

pub mod attendance;
pub mod employee;
pub mod holiday;
pub mod leave_balance;
pub mod leave_request;
pub mod shift;
pub mod swap_request;
