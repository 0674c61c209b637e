pub mod calendar;
pub mod clock;
pub mod errors;
pub mod memory;
pub mod models;
pub mod policy;
pub mod services;
pub mod store;
