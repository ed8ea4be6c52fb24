use crate::{
    error::ApiError,
    model::attendance::{Attendance, AttendanceStatus, NewAttendance},
    store,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

/// Unknown status literals and malformed dates fail JSON decoding with a 400.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "2024-01-03", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceMarked {
    #[schema(example = "Attendance marked successfully")]
    pub message: String,
    pub data: Attendance,
}

/// Mark attendance for one day
#[utoipa::path(
    post,
    path = "/employees/{id}/attendance",
    params(
        ("id", Path, description = "Employee surrogate ID")
    ),
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance marked successfully", body = AttendanceMarked),
        (status = 400, description = "Invalid input, or attendance already marked for this date", body = Object, example = json!({
            "detail": "Attendance already marked for this date"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let new = NewAttendance {
        date: payload.date,
        status: payload.status,
    };

    // The INSERT is the first statement so the transaction takes the write lock
    // up front; an unknown employee surfaces as a foreign-key violation.
    let mut tx = pool.begin().await?;
    let record = store::attendance::insert(&mut tx, employee_id, &new).await?;
    tx.commit().await?;

    info!(employee_id, date = %record.date, status = %record.status, "Attendance marked");
    Ok(HttpResponse::Ok().json(AttendanceMarked {
        message: "Attendance marked successfully".to_string(),
        data: record,
    }))
}

/// List attendance, most recent date first
#[utoipa::path(
    get,
    path = "/employees/{id}/attendance",
    params(
        ("id", Path, description = "Employee surrogate ID")
    ),
    responses(
        (status = 200, description = "Attendance records ordered by date descending", body = [Attendance]),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let mut tx = pool.begin().await?;
    store::employee::get(&mut tx, employee_id).await?;
    let records = store::attendance::list_for_employee(&mut tx, employee_id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Attendance totals for one employee
#[utoipa::path(
    get,
    path = "/employees/{id}/attendance/summary",
    params(
        ("id", Path, description = "Employee surrogate ID")
    ),
    responses(
        (status = 200, description = "Attendance summary", body = AttendanceSummary),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let employee = store::employee::get(&mut tx, employee_id).await?;
    let records = store::attendance::list_for_employee(&mut tx, employee_id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(store::attendance::summarize(&employee, &records)))
}

#[cfg(test)]
mod tests {
    use crate::{
        db::{file_pool, test_pool},
        routes,
    };
    use futures::future::join_all;
    use actix_web::{App, http::StatusCode, test, web::Data};
    use serde_json::{Value, json};

    fn create_employee_req(code: &str) -> test::TestRequest {
        test::TestRequest::post().uri("/employees").set_json(json!({
            "employee_id": code,
            "full_name": format!("Employee {code}"),
            "email": format!("{}@company.com", code.to_lowercase()),
            "department": "Operations"
        }))
    }

    fn mark_req(id: i64, date: &str, status: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(&format!("/employees/{id}/attendance"))
            .set_json(json!({ "date": date, "status": status }))
    }

    fn created_id(body: &Value) -> i64 {
        body["data"]["id"].as_i64().unwrap()
    }

    #[actix_web::test]
    async fn mark_returns_created_record() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        let req = test::TestRequest::post()
            .uri(&format!("/employees/{id}/attendance"))
            .set_json(json!({ "date": "2024-01-01", "status": "Leave" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Attendance marked successfully");
        assert_eq!(body["data"]["date"], "2024-01-01");
        assert_eq!(body["data"]["status"], "Leave");
        assert_eq!(body["data"]["employee_id"], id);
    }

    #[actix_web::test]
    async fn duplicate_day_is_rejected() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        let resp = test::call_service(&app, mark_req(id, "2024-01-01", "Present").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, mark_req(id, "2024-01-01", "Absent").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Attendance already marked for this date");

        let req = test::TestRequest::get()
            .uri(&format!("/employees/{id}/attendance"))
            .to_request();
        let records: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["status"], "Present");
    }

    #[actix_web::test]
    async fn bad_status_or_date_is_400() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        for (date, status) in [
            ("2024-01-01", "present"),
            ("2024-01-01", "Sick"),
            ("01/02/2024", "Present"),
            ("2024-02-30", "Present"),
        ] {
            let resp = test::call_service(&app, mark_req(id, date, status).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{date} {status}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body["detail"].is_string());
        }
    }

    #[actix_web::test]
    async fn listing_is_newest_first() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        for date in ["2024-01-01", "2024-01-03", "2024-01-02"] {
            let resp = test::call_service(&app, mark_req(id, date, "Present").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/employees/{id}/attendance"))
            .to_request();
        let records: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let dates: Vec<&str> = records.iter().map(|r| r["date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[actix_web::test]
    async fn summary_totals() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-007").to_request()).await;
        let id = created_id(&created);

        let marks = [
            ("2024-01-01", "Present"),
            ("2024-01-02", "Present"),
            ("2024-01-03", "Absent"),
            ("2024-01-04", "Present"),
            ("2024-01-05", "Absent"),
        ];
        for (date, status) in marks {
            let resp = test::call_service(&app, mark_req(id, date, status).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/employees/{id}/attendance/summary"))
            .to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            summary,
            json!({
                "employee_id": "EMP-007",
                "full_name": "Employee EMP-007",
                "total_records": 5,
                "total_present": 3,
                "total_absent": 2
            })
        );
    }

    #[actix_web::test]
    async fn delete_cascades_to_attendance() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);
        for date in ["2024-01-01", "2024-01-02"] {
            let resp = test::call_service(&app, mark_req(id, date, "Present").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::delete()
            .uri(&format!("/employees/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let remaining: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attendance WHERE employee_id = ?")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(remaining.0, 0);

        let req = test::TestRequest::get()
            .uri(&format!("/employees/{id}/attendance"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn missing_employee_is_404_everywhere() {
        let pool = test_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;

        assert_eq!(
            test::call_service(&app, mark_req(404, "2024-01-01", "Present").to_request())
                .await
                .status(),
            StatusCode::NOT_FOUND
        );
        for uri in ["/employees/404/attendance", "/employees/404/attendance/summary"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["detail"], "Employee not found");
        }
    }

    #[actix_web::test]
    async fn racing_marks_for_one_day_yield_one_record() {
        let (_dir, pool) = file_pool().await;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        let statuses: Vec<StatusCode> = join_all((0..20).map(|_| {
            let req = mark_req(id, "2024-01-01", "Present").to_request();
            let app = &app;
            async move { test::call_service(app, req).await.status() }
        }))
        .await;

        let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let conflicts = statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count();
        assert_eq!((ok, conflicts), (1, 19), "{statuses:?}");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance WHERE employee_id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[actix_web::test]
    async fn racing_marks_for_different_days_all_succeed() {
        let (_dir, pool) = file_pool().await;
        let app = test::init_service(
            App::new().app_data(Data::new(pool)).configure(routes::configure),
        )
        .await;
        let created: Value =
            test::call_and_read_body_json(&app, create_employee_req("EMP-001").to_request()).await;
        let id = created_id(&created);

        let statuses: Vec<StatusCode> = join_all((1..=20).map(|d| {
            let req = mark_req(id, &format!("2024-01-{d:02}"), "Present").to_request();
            let app = &app;
            async move { test::call_service(app, req).await.status() }
        }))
        .await;
        assert!(statuses.iter().all(|s| *s == StatusCode::OK), "{statuses:?}");

        let req = test::TestRequest::get()
            .uri(&format!("/employees/{id}/attendance"))
            .to_request();
        let records: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(records.len(), 20);
    }
}
