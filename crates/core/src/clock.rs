use chrono::{Local, NaiveDate, NaiveDateTime};
use mockall::automock;

/// Source of "now" for the request layer. Services never read the clock
/// themselves; they receive the instant as a parameter.
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl dyn Clock {
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
