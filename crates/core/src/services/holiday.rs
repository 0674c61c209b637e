use chrono::{Datelike, Duration, NaiveDate};
use tracing::info;

use crate::errors::{HrError, HrResult};
use crate::models::holiday::{CreateHolidayRequest, Holiday};
use crate::store::{Store, Transaction};

const UPCOMING_LIMIT: usize = 5;

fn year_bounds(year: i32) -> HrResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    first
        .zip(last)
        .ok_or_else(|| HrError::Validation(format!("Invalid year: {year}")))
}

pub async fn annual_holidays<S: Store>(store: &S, year: i32) -> HrResult<Vec<Holiday>> {
    let (first, last) = year_bounds(year)?;
    let mut tx = store.begin().await?;
    tx.holidays_between(first, last).await
}

/// The next few holidays of the current calendar year, strictly after `today`.
pub async fn upcoming_holidays<S: Store>(store: &S, today: NaiveDate) -> HrResult<Vec<Holiday>> {
    let (_, last) = year_bounds(today.year())?;
    let mut tx = store.begin().await?;
    let mut holidays = tx.holidays_between(today + Duration::days(1), last).await?;
    holidays.truncate(UPCOMING_LIMIT);
    Ok(holidays)
}

pub async fn add_holiday<S: Store>(store: &S, request: CreateHolidayRequest) -> HrResult<Holiday> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(HrError::Validation(
            "Holiday description cannot be empty".to_string(),
        ));
    }

    let holiday = Holiday {
        date: request.date,
        year: request.date.year(),
        description: description.to_string(),
    };

    let mut tx = store.begin().await?;
    tx.insert_holiday(&holiday).await?;
    tx.commit().await?;

    info!(date = %holiday.date, "Added holiday");
    Ok(holiday)
}
