use eyre::Result;
use sqlx::PgConnection;

use crate::models::DbEmployee;

pub async fn get_employee_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<DbEmployee>> {
    tracing::debug!("Getting employee by id: {}", id);

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, first_name, last_name, email, role, manager_id
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(employee)
}

pub async fn get_employees_by_manager(conn: &mut PgConnection, manager_id: i32) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, first_name, last_name, email, role, manager_id
        FROM employees
        WHERE manager_id = $1
        ORDER BY id
        "#,
    )
    .bind(manager_id)
    .fetch_all(&mut *conn)
    .await?;

    tracing::debug!("Found {} employees under manager {}", employees.len(), manager_id);
    Ok(employees)
}
