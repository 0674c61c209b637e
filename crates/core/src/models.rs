pub mod attendance;
pub mod employee;
pub mod holiday;
pub mod leave;
pub mod report;
pub mod shift;
