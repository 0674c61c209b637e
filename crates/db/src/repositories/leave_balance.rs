use chrono::NaiveDate;
use eyre::{Result, eyre};
use sqlx::PgConnection;

use crate::models::DbLeaveBalance;

/// Reads a ledger row and locks it until the transaction ends.
pub async fn get_leave_balance(
    conn: &mut PgConnection,
    employee_id: i32,
    year: NaiveDate,
) -> Result<Option<DbLeaveBalance>> {
    let balance = sqlx::query_as::<_, DbLeaveBalance>(
        r#"
        SELECT employee_id, year, casual, sick, vacation, medical
        FROM leave_balances
        WHERE employee_id = $1 AND year = $2
        FOR UPDATE
        "#,
    )
    .bind(employee_id)
    .bind(year)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(balance)
}

/// Returns `false` when a ledger for the same employee and year exists.
pub async fn create_leave_balance(conn: &mut PgConnection, balance: &DbLeaveBalance) -> Result<bool> {
    tracing::debug!(
        "Creating leave balance: employee_id={}, year={}",
        balance.employee_id,
        balance.year
    );

    let result = sqlx::query(
        r#"
        INSERT INTO leave_balances (employee_id, year, casual, sick, vacation, medical)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (employee_id, year) DO NOTHING
        "#,
    )
    .bind(balance.employee_id)
    .bind(balance.year)
    .bind(balance.casual)
    .bind(balance.sick)
    .bind(balance.vacation)
    .bind(balance.medical)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn update_leave_balance(conn: &mut PgConnection, balance: &DbLeaveBalance) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE leave_balances
        SET casual = $3, sick = $4, vacation = $5, medical = $6
        WHERE employee_id = $1 AND year = $2
        "#,
    )
    .bind(balance.employee_id)
    .bind(balance.year)
    .bind(balance.casual)
    .bind(balance.sick)
    .bind(balance.vacation)
    .bind(balance.medical)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!(
            "No leave balance for employee {} and year {}",
            balance.employee_id,
            balance.year
        ));
    }

    Ok(())
}
