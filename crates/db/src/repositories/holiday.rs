use chrono::NaiveDate;
use eyre::Result;
use sqlx::PgConnection;

use crate::models::DbHoliday;

pub async fn get_holidays_between(
    conn: &mut PgConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbHoliday>> {
    let holidays = sqlx::query_as::<_, DbHoliday>(
        r#"
        SELECT date, year, description
        FROM holiday_calendar
        WHERE date BETWEEN $1 AND $2
        ORDER BY date
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;

    Ok(holidays)
}

/// Returns `false` when the date is already on the calendar.
pub async fn create_holiday(
    conn: &mut PgConnection,
    date: NaiveDate,
    year: i32,
    description: &str,
) -> Result<bool> {
    tracing::debug!("Creating holiday: date={}, description={}", date, description);

    let result = sqlx::query(
        r#"
        INSERT INTO holiday_calendar (date, year, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (date) DO NOTHING
        "#,
    )
    .bind(date)
    .bind(year)
    .bind(description)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}
