use chrono::NaiveDate;
use eyre::Result;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::DbShiftSwapRequest;

pub async fn get_swap_request_by_id(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<DbShiftSwapRequest>> {
    tracing::debug!("Getting swap request by id: {}", id);

    let request = sqlx::query_as::<_, DbShiftSwapRequest>(
        r#"
        SELECT id, shift_id, employee_id, shift_date, change_from, change_to, status, updated_at
        FROM shift_swap_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(request)
}

pub async fn get_swap_requests_by_shift(
    conn: &mut PgConnection,
    shift_id: Uuid,
) -> Result<Vec<DbShiftSwapRequest>> {
    let requests = sqlx::query_as::<_, DbShiftSwapRequest>(
        r#"
        SELECT id, shift_id, employee_id, shift_date, change_from, change_to, status, updated_at
        FROM shift_swap_requests
        WHERE shift_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(shift_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn get_swap_requests_by_shifts(
    conn: &mut PgConnection,
    shift_ids: &[Uuid],
) -> Result<Vec<DbShiftSwapRequest>> {
    let requests = sqlx::query_as::<_, DbShiftSwapRequest>(
        r#"
        SELECT id, shift_id, employee_id, shift_date, change_from, change_to, status, updated_at
        FROM shift_swap_requests
        WHERE shift_id = ANY($1)
        ORDER BY updated_at DESC
        "#,
    )
    .bind(shift_ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn get_swap_requests_by_employee_from(
    conn: &mut PgConnection,
    employee_id: i32,
    from: NaiveDate,
) -> Result<Vec<DbShiftSwapRequest>> {
    let requests = sqlx::query_as::<_, DbShiftSwapRequest>(
        r#"
        SELECT id, shift_id, employee_id, shift_date, change_from, change_to, status, updated_at
        FROM shift_swap_requests
        WHERE employee_id = $1 AND shift_date >= $2
        ORDER BY shift_date, updated_at
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn get_pending_team_swap_requests(
    conn: &mut PgConnection,
    manager_id: i32,
    after: NaiveDate,
) -> Result<Vec<DbShiftSwapRequest>> {
    let requests = sqlx::query_as::<_, DbShiftSwapRequest>(
        r#"
        SELECT r.id, r.shift_id, r.employee_id, r.shift_date, r.change_from, r.change_to,
               r.status, r.updated_at
        FROM shift_swap_requests r
        JOIN employees e ON e.id = r.employee_id
        WHERE e.manager_id = $1
          AND r.status = 'Pending'
          AND r.shift_date > $2
        ORDER BY r.shift_date, r.employee_id
        "#,
    )
    .bind(manager_id)
    .bind(after)
    .fetch_all(&mut *conn)
    .await?;

    Ok(requests)
}

pub async fn create_swap_request(conn: &mut PgConnection, request: &DbShiftSwapRequest) -> Result<()> {
    tracing::debug!(
        "Creating swap request: id={}, shift_id={}, {} -> {}",
        request.id,
        request.shift_id,
        request.change_from,
        request.change_to
    );

    sqlx::query(
        r#"
        INSERT INTO shift_swap_requests
            (id, shift_id, employee_id, shift_date, change_from, change_to, status, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(request.id)
    .bind(request.shift_id)
    .bind(request.employee_id)
    .bind(request.shift_date)
    .bind(&request.change_from)
    .bind(&request.change_to)
    .bind(&request.status)
    .bind(request.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Overwrites the request only while its stored status is `expected`.
pub async fn update_swap_request_if_status(
    conn: &mut PgConnection,
    request: &DbShiftSwapRequest,
    expected: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE shift_swap_requests
        SET change_to = $2, status = $3, updated_at = $4
        WHERE id = $1 AND status = $5
        "#,
    )
    .bind(request.id)
    .bind(&request.change_to)
    .bind(&request.status)
    .bind(request.updated_at)
    .bind(expected)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}
