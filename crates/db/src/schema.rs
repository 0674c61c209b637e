use chrono::{Datelike, NaiveDate};
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres};
use tracing::info;

/// Fixed public holidays shipped with the portal.
const HOLIDAYS_2025: [(&str, &str); 12] = [
    ("2025-01-01", "New Year's Day"),
    ("2025-01-14", "Pongal"),
    ("2025-01-26", "Republic Day"),
    ("2025-03-21", "Holi"),
    ("2025-04-14", "Tamil New Year"),
    ("2025-05-01", "Labour Day"),
    ("2025-08-15", "Independence Day"),
    ("2025-09-17", "Ganesh Chaturthi"),
    ("2025-10-02", "Gandhi Jayanti"),
    ("2025-10-22", "Dussehra"),
    ("2025-11-04", "Diwali"),
    ("2025-12-25", "Christmas"),
];

/// Starting directory: two managers and their reports.
const EMPLOYEES: [(i32, &str, &str, &str, &str, Option<i32>); 11] = [
    (1, "John", "Doe", "john.doe@example.com", "Manager", None),
    (2, "Jane", "Smith", "jane.smith@example.com", "Manager", None),
    (3, "Alice", "Johnson", "alice.johnson@example.com", "Developer", Some(1)),
    (4, "Bob", "Brown", "bob.brown@example.com", "DevOps Engineer", Some(1)),
    (5, "Charlie", "Davis", "charlie.davis@example.com", "Maintenance Engineer", Some(1)),
    (6, "Eve", "Wilson", "eve.wilson@example.com", "Developer", Some(2)),
    (7, "Alex", "Jones", "alex.jones@example.com", "Tester", Some(2)),
    (8, "Maria", "Lopez", "maria.lopez@example.com", "Maintenance Engineer", Some(2)),
    (9, "Jack", "Lol", "jack.lol@example.com", "DevOps Engineer", Some(2)),
    (10, "Elon", "Mask", "elon.mask@example.com", "Network Engineer", Some(2)),
    (11, "Jan", "Doe", "jan.doe@example.com", "Tester", Some(1)),
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            role VARCHAR(64) NOT NULL,
            manager_id INTEGER NULL REFERENCES employees(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create holiday_calendar table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS holiday_calendar (
            date DATE PRIMARY KEY,
            year INTEGER NOT NULL,
            description VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create leave_balances table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leave_balances (
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            year DATE NOT NULL,
            casual INTEGER NOT NULL CHECK (casual >= 0),
            sick INTEGER NOT NULL CHECK (sick >= 0),
            vacation INTEGER NOT NULL CHECK (vacation >= 0),
            medical INTEGER NOT NULL CHECK (medical >= 0),
            PRIMARY KEY (employee_id, year)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create leave_requests table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leave_requests (
            id UUID PRIMARY KEY,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            leave_type VARCHAR(16) NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            total_days INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL,
            updated_at TIMESTAMP NOT NULL,
            CONSTRAINT valid_leave_range CHECK (end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id UUID PRIMARY KEY,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            date DATE NOT NULL,
            clock_in SMALLINT NOT NULL DEFAULT 0,
            clock_in_time TIMESTAMP NOT NULL,
            clock_out SMALLINT NOT NULL DEFAULT 0,
            clock_out_time TIMESTAMP NULL,
            work_hours DOUBLE PRECISION NOT NULL DEFAULT 0,
            percentage DOUBLE PRECISION NOT NULL DEFAULT 0,
            UNIQUE (employee_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create shifts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id UUID PRIMARY KEY,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            shift_date DATE NOT NULL,
            shift_time VARCHAR(16) NOT NULL,
            UNIQUE (employee_id, shift_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create shift_swap_requests table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shift_swap_requests (
            id UUID PRIMARY KEY,
            shift_id UUID NOT NULL REFERENCES shifts(id),
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            shift_date DATE NOT NULL,
            change_from VARCHAR(16) NOT NULL,
            change_to VARCHAR(16) NOT NULL,
            status VARCHAR(16) NOT NULL,
            updated_at TIMESTAMP NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_employees_manager_id ON employees(manager_id)",
        "CREATE INDEX IF NOT EXISTS idx_leave_requests_employee_id ON leave_requests(employee_id)",
        "CREATE INDEX IF NOT EXISTS idx_leave_requests_status ON leave_requests(status)",
        "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date)",
        "CREATE INDEX IF NOT EXISTS idx_shift_swap_requests_shift_id ON shift_swap_requests(shift_id)",
        "CREATE INDEX IF NOT EXISTS idx_shift_swap_requests_employee_id ON shift_swap_requests(employee_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    seed_reference_data(pool).await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

async fn seed_reference_data(pool: &Pool<Postgres>) -> Result<()> {
    for (date, description) in HOLIDAYS_2025 {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .wrap_err_with(|| format!("Invalid seed holiday date {date}"))?;
        sqlx::query(
            r#"
            INSERT INTO holiday_calendar (date, year, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (date) DO NOTHING
            "#,
        )
        .bind(date)
        .bind(date.year())
        .bind(description)
        .execute(pool)
        .await
        .wrap_err_with(|| format!("Failed to seed holiday {date}"))?;
    }

    // Managers come first so the manager_id references resolve
    for (id, first_name, last_name, email, role, manager_id) in EMPLOYEES {
        sqlx::query(
            r#"
            INSERT INTO employees (id, first_name, last_name, email, role, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(role)
        .bind(manager_id)
        .execute(pool)
        .await
        .wrap_err_with(|| format!("Failed to seed employee {id}"))?;
    }

    // Explicit ids leave the serial behind
    sqlx::query("SELECT setval('employees_id_seq', (SELECT MAX(id) FROM employees))")
        .execute(pool)
        .await?;

    info!(
        holidays = HOLIDAYS_2025.len(),
        employees = EMPLOYEES.len(),
        "Seeded reference data"
    );
    Ok(())
}
