//! Route tables, one module per resource. Each returns a router over the
//! shared state so `app` can merge them.

pub mod attendance;
pub mod employees;
pub mod health;
pub mod holidays;
pub mod leave;
pub mod reports;
pub mod shifts;
pub mod swaps;
