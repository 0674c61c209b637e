use chrono::NaiveDate;
use eyre::{Result, eyre};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::DbShift;

pub async fn get_shift_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<DbShift>> {
    tracing::debug!("Getting shift by id: {}", id);

    let shift = sqlx::query_as::<_, DbShift>(
        r#"
        SELECT id, employee_id, shift_date, shift_time
        FROM shifts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(shift)
}

pub async fn get_shifts_between(
    conn: &mut PgConnection,
    employee_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbShift>> {
    let shifts = sqlx::query_as::<_, DbShift>(
        r#"
        SELECT id, employee_id, shift_date, shift_time
        FROM shifts
        WHERE employee_id = $1 AND shift_date BETWEEN $2 AND $3
        ORDER BY shift_date
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shifts)
}

pub async fn get_team_shifts_from(
    conn: &mut PgConnection,
    manager_id: i32,
    from: NaiveDate,
) -> Result<Vec<DbShift>> {
    let shifts = sqlx::query_as::<_, DbShift>(
        r#"
        SELECT s.id, s.employee_id, s.shift_date, s.shift_time
        FROM shifts s
        JOIN employees e ON e.id = s.employee_id
        WHERE e.manager_id = $1 AND s.shift_date >= $2
        ORDER BY s.shift_date, s.employee_id
        "#,
    )
    .bind(manager_id)
    .bind(from)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shifts)
}

/// Returns `false` when the employee already has a shift on that date.
pub async fn create_shift(conn: &mut PgConnection, shift: &DbShift) -> Result<bool> {
    tracing::debug!(
        "Creating shift: employee_id={}, date={}, time={}",
        shift.employee_id,
        shift.shift_date,
        shift.shift_time
    );

    let result = sqlx::query(
        r#"
        INSERT INTO shifts (id, employee_id, shift_date, shift_time)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (employee_id, shift_date) DO NOTHING
        "#,
    )
    .bind(shift.id)
    .bind(shift.employee_id)
    .bind(shift.shift_date)
    .bind(&shift.shift_time)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn update_shift_time(conn: &mut PgConnection, id: Uuid, shift_time: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE shifts
        SET shift_time = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(shift_time)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("Shift {} not found", id));
    }
    Ok(())
}
