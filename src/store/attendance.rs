use crate::{
    error::{ApiError, is_foreign_key_violation, is_unique_violation},
    model::{
        attendance::{Attendance, AttendanceStatus, AttendanceSummary, NewAttendance},
        employee::Employee,
    },
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

/// The (employee_id, date) UNIQUE constraint decides duplicates.
pub async fn insert(
    conn: &mut SqliteConnection,
    employee_id: i64,
    new: &NewAttendance,
) -> Result<Attendance, ApiError> {
    sqlx::query_as::<_, Attendance>(
        r#"
        INSERT INTO attendance (date, status, employee_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, date, status, employee_id, created_at
        "#,
    )
    .bind(new.date)
    .bind(new.status.as_ref())
    .bind(employee_id)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            debug!(employee_id, date = %new.date, "Duplicate attendance rejected");
            ApiError::Conflict("Attendance already marked for this date".to_string())
        } else if is_foreign_key_violation(&e) {
            ApiError::employee_not_found()
        } else {
            e.into()
        }
    })
}

/// Most recent date first.
pub async fn list_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<Attendance>, ApiError> {
    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, date, status, employee_id, created_at
        FROM attendance
        WHERE employee_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(conn)
    .await?;
    Ok(records)
}

pub fn summarize(employee: &Employee, records: &[Attendance]) -> AttendanceSummary {
    let count = |status: AttendanceStatus| records.iter().filter(|r| r.status == status).count() as i64;

    AttendanceSummary {
        employee_id: employee.employee_id.clone(),
        full_name: employee.full_name.clone(),
        total_records: records.len() as i64,
        total_present: count(AttendanceStatus::Present),
        total_absent: count(AttendanceStatus::Absent),
    }
}
