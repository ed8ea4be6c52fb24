use crate::{
    error::{ApiError, is_unique_violation},
    model::employee::{Employee, NewEmployee},
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

/// Uniqueness of `employee_id` and `email` is left to the UNIQUE constraints,
/// so two racing inserts cannot both succeed.
pub async fn insert(conn: &mut SqliteConnection, new: &NewEmployee) -> Result<Employee, ApiError> {
    sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, employee_id, full_name, email, department, created_at
        "#,
    )
    .bind(&new.employee_id)
    .bind(&new.full_name)
    .bind(&new.email)
    .bind(&new.department)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            debug!(employee_id = %new.employee_id, "Duplicate employee rejected");
            ApiError::Conflict("Employee with this ID or email already exists".to_string())
        } else {
            e.into()
        }
    })
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Employee>, ApiError> {
    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(employee)
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Employee, ApiError> {
    find(conn, id).await?.ok_or_else(ApiError::employee_not_found)
}

pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Employee>, ApiError> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(employees)
}

/// Removes the employee and every attendance row it owns.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), ApiError> {
    let removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::employee_not_found());
    }

    debug!(id, attendance_removed = removed.rows_affected(), "Employee deleted");
    Ok(())
}
