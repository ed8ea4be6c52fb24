use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = Object, example = json!({
            "message": "HRMS Lite API is running",
            "status": "ok",
            "version": "1.0.0"
        }))
    ),
    tag = "Health"
)]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS Lite API is running",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
