use crate::api::attendance::{AttendanceMarked, MarkAttendance};
use crate::api::employee::{CreateEmployee, EmployeeCreated};
use crate::model::attendance::{Attendance, AttendanceStatus, AttendanceSummary};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management API.

### 🔹 Features
- **Employees**: create, list, view and delete employee records
- **Attendance**: mark one status per employee per day (`Present`, `Absent`, `Leave`),
  list it newest first and view per-employee totals

### 📦 Response Format
- JSON bodies; dates are `YYYY-MM-DD`
- Errors carry a `detail` message (400 invalid input or duplicate, 404 unknown employee)

Deleting an employee deletes all of its attendance records.
"#,
    ),
    paths(
        crate::api::health::index,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::attendance_summary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            EmployeeCreated,
            Attendance,
            AttendanceStatus,
            AttendanceSummary,
            MarkAttendance,
            AttendanceMarked
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
