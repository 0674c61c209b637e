use chrono::NaiveDate;
use eyre::Result;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::DbLeaveRequest;

pub async fn get_leave_request_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<DbLeaveRequest>> {
    tracing::debug!("Getting leave request by id: {}", id);

    let request = sqlx::query_as::<_, DbLeaveRequest>(
        r#"
        SELECT id, employee_id, leave_type, start_date, end_date, total_days, status, updated_at
        FROM leave_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(request)
}

pub async fn get_leave_requests_by_employee(
    conn: &mut PgConnection,
    employee_id: i32,
) -> Result<Vec<DbLeaveRequest>> {
    let requests = sqlx::query_as::<_, DbLeaveRequest>(
        r#"
        SELECT id, employee_id, leave_type, start_date, end_date, total_days, status, updated_at
        FROM leave_requests
        WHERE employee_id = $1
        ORDER BY start_date, updated_at
        "#,
    )
    .bind(employee_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn get_pending_team_leave_requests(
    conn: &mut PgConnection,
    manager_id: i32,
    after: NaiveDate,
) -> Result<Vec<DbLeaveRequest>> {
    let requests = sqlx::query_as::<_, DbLeaveRequest>(
        r#"
        SELECT lr.id, lr.employee_id, lr.leave_type, lr.start_date, lr.end_date,
               lr.total_days, lr.status, lr.updated_at
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE e.manager_id = $1
          AND lr.status = 'Pending'
          AND lr.start_date > $2
        ORDER BY lr.start_date, lr.employee_id
        "#,
    )
    .bind(manager_id)
    .bind(after)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn create_leave_request(conn: &mut PgConnection, request: &DbLeaveRequest) -> Result<()> {
    tracing::debug!(
        "Creating leave request: id={}, employee_id={}, {}..{}",
        request.id,
        request.employee_id,
        request.start_date,
        request.end_date
    );

    sqlx::query(
        r#"
        INSERT INTO leave_requests
            (id, employee_id, leave_type, start_date, end_date, total_days, status, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(request.id)
    .bind(request.employee_id)
    .bind(&request.leave_type)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.total_days)
    .bind(&request.status)
    .bind(request.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Overwrites the request only while its stored status is `expected`.
/// Returns whether a row was updated.
pub async fn update_leave_request_if_status(
    conn: &mut PgConnection,
    request: &DbLeaveRequest,
    expected: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET leave_type = $2, start_date = $3, end_date = $4, total_days = $5,
            status = $6, updated_at = $7
        WHERE id = $1 AND status = $8
        "#,
    )
    .bind(request.id)
    .bind(&request.leave_type)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.total_days)
    .bind(&request.status)
    .bind(request.updated_at)
    .bind(expected)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(
        "Leave request {} update (expected {}): {} rows",
        request.id,
        expected,
        result.rows_affected()
    );
    Ok(result.rows_affected() == 1)
}
