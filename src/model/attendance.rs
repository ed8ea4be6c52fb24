use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Stored as the exact variant name, case-sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl TryFrom<String> for AttendanceStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "2024-01-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[sqlx(try_from = "String")]
    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    /// Surrogate id of the owning employee
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2024-01-03T09:00:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewAttendance {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    /// Business identifier of the employee, not the surrogate id
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = 5)]
    pub total_records: i64,
    #[schema(example = 3)]
    pub total_present: i64,
    #[schema(example = 2)]
    pub total_absent: i64,
}
