use chrono::NaiveDate;
use eyre::{Result, eyre};
use sqlx::PgConnection;

use crate::models::DbAttendance;

const COLUMNS: &str = "a.id, a.employee_id, a.date, a.clock_in, a.clock_in_time, a.clock_out, \
                       a.clock_out_time, a.work_hours, a.percentage";

pub async fn get_attendance_on(
    conn: &mut PgConnection,
    employee_id: i32,
    date: NaiveDate,
) -> Result<Option<DbAttendance>> {
    let query = format!(
        "SELECT {COLUMNS} FROM attendance a WHERE a.employee_id = $1 AND a.date = $2"
    );
    let row = sqlx::query_as::<_, DbAttendance>(&query)
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row)
}

pub async fn get_attendance_between(
    conn: &mut PgConnection,
    employee_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbAttendance>> {
    let query = format!(
        "SELECT {COLUMNS} FROM attendance a \
         WHERE a.employee_id = $1 AND a.date BETWEEN $2 AND $3 \
         ORDER BY a.date"
    );
    let rows = sqlx::query_as::<_, DbAttendance>(&query)
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows)
}

pub async fn get_team_attendance_between(
    conn: &mut PgConnection,
    manager_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbAttendance>> {
    let query = format!(
        "SELECT {COLUMNS} FROM attendance a \
         JOIN employees e ON e.id = a.employee_id \
         WHERE e.manager_id = $1 AND a.date BETWEEN $2 AND $3 \
         ORDER BY a.date, a.employee_id"
    );
    let rows = sqlx::query_as::<_, DbAttendance>(&query)
        .bind(manager_id)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *conn)
        .await?;

    tracing::debug!("Found {} attendance rows for manager {}", rows.len(), manager_id);
    Ok(rows)
}

/// Returns `false` when the employee already has a row for that date.
pub async fn create_attendance(conn: &mut PgConnection, row: &DbAttendance) -> Result<bool> {
    tracing::debug!("Creating attendance: employee_id={}, date={}", row.employee_id, row.date);

    let result = sqlx::query(
        r#"
        INSERT INTO attendance
            (id, employee_id, date, clock_in, clock_in_time, clock_out, clock_out_time,
             work_hours, percentage)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (employee_id, date) DO NOTHING
        "#,
    )
    .bind(row.id)
    .bind(row.employee_id)
    .bind(row.date)
    .bind(row.clock_in)
    .bind(row.clock_in_time)
    .bind(row.clock_out)
    .bind(row.clock_out_time)
    .bind(row.work_hours)
    .bind(row.percentage)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn update_attendance(conn: &mut PgConnection, row: &DbAttendance) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET clock_out = $2, clock_out_time = $3, work_hours = $4, percentage = $5
        WHERE id = $1
        "#,
    )
    .bind(row.id)
    .bind(row.clock_out)
    .bind(row.clock_out_time)
    .bind(row.work_hours)
    .bind(row.percentage)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre!("Attendance row {} disappeared", row.id));
    }
    Ok(())
}
