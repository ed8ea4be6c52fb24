use crate::{
    error::ApiError,
    model::employee::{Employee, NewEmployee},
    store,
    utils::validation::{FieldErrors, bounded_text, email},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<NewEmployee, ApiError> {
        let mut errors = FieldErrors::default();
        let new = NewEmployee {
            employee_id: bounded_text(&mut errors, "employee_id", &self.employee_id, 50),
            full_name: bounded_text(&mut errors, "full_name", &self.full_name, 100),
            email: email(&mut errors, "email", &self.email),
            department: bounded_text(&mut errors, "department", &self.department, 50),
        };
        errors.into_result().map_err(ApiError::Validation)?;
        Ok(new)
    }
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeCreated {
    #[schema(example = "Employee created successfully")]
    pub message: String,
    pub data: Employee,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created successfully", body = EmployeeCreated),
        (status = 400, description = "Invalid input, or employee ID / email already exists", body = Object, example = json!({
            "detail": "Employee with this ID or email already exists"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "detail": "Internal server error"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.validate()?;

    let mut tx = pool.begin().await?;
    let employee = store::employee::insert(&mut tx, &new).await?;
    tx.commit().await?;

    info!(id = employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Ok().json(EmployeeCreated {
        message: "Employee created successfully".to_string(),
        data: employee,
    }))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mut tx = pool.begin().await?;
    let employees = store::employee::list(&mut tx).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee surrogate ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let mut tx = pool.begin().await?;
    let employee = store::employee::get(&mut tx, id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee together with its attendance records
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee surrogate ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let mut tx = pool.begin().await?;
    store::employee::delete(&mut tx, id).await?;
    tx.commit().await?;

    info!(id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
