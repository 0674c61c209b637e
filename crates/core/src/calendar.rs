//! Business-day arithmetic shared by the leave, attendance and shift workflows.
//!
//! A business day is any Monday to Friday that is not listed in the holiday
//! calendar. Everything here is pure; the async helpers only load the holiday
//! dates a range needs and then defer to the pure functions.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::errors::{HrError, HrResult};
use crate::store::Transaction;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_business_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !is_weekend(date) && !holidays.contains(&date)
}

/// Every calendar date in `[start, end]`, in order. Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Counts the business days in the inclusive range `[start, end]`.
///
/// # Errors
///
/// * `HrError::Validation` - `start` falls after `end`
pub fn business_day_count(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> HrResult<i32> {
    if start > end {
        return Err(HrError::Validation(
            "Start date cannot be after end date".to_string(),
        ));
    }

    let count = days_between(start, end)
        .filter(|day| is_business_day(*day, holidays))
        .count();

    Ok(count as i32)
}

/// Monday..Friday of the week containing `today`.
pub fn work_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(today.weekday().num_days_from_monday());
    let monday = today - Duration::days(offset);
    (monday, monday + Duration::days(4))
}

pub async fn holiday_dates<T: Transaction>(
    tx: &mut T,
    start: NaiveDate,
    end: NaiveDate,
) -> HrResult<HashSet<NaiveDate>> {
    let holidays = tx.holidays_between(start, end).await?;
    Ok(holidays.into_iter().map(|holiday| holiday.date).collect())
}

/// `business_day_count` against the holiday calendar held by the store.
pub async fn count_business_days<T: Transaction>(
    tx: &mut T,
    start: NaiveDate,
    end: NaiveDate,
) -> HrResult<i32> {
    if start > end {
        return business_day_count(start, end, &HashSet::new());
    }
    let holidays = holiday_dates(tx, start, end).await?;
    business_day_count(start, end, &holidays)
}

pub async fn is_working_day<T: Transaction>(tx: &mut T, date: NaiveDate) -> HrResult<bool> {
    if is_weekend(date) {
        return Ok(false);
    }
    let holidays = holiday_dates(tx, date, date).await?;
    Ok(!holidays.contains(&date))
}
