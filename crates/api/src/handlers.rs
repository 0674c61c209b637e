//! Request handlers. Each one resolves the caller, reads the clock once and
//! hands off to the matching workflow in `leavedesk_core::services`.

pub mod attendance;
pub mod balance;
pub mod employee;
pub mod holiday;
pub mod leave;
pub mod report;
pub mod shift;
pub mod swap;
