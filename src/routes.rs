use crate::{
    api::{attendance, employee, health},
    error::ApiError,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures become ValidationError bodies instead of actix's plain-text defaults
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid path parameter: {err}")).into()
    }));

    cfg.service(health::index).service(
        web::scope("/employees")
            // /employees
            .service(
                web::resource("")
                    .route(web::post().to(employee::create_employee))
                    .route(web::get().to(employee::list_employees)),
            )
            // /employees/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::delete().to(employee::delete_employee)),
            )
            // /employees/{id}/attendance
            .service(
                web::resource("/{id}/attendance")
                    .route(web::post().to(attendance::mark_attendance))
                    .route(web::get().to(attendance::list_attendance)),
            )
            // /employees/{id}/attendance/summary
            .service(
                web::resource("/{id}/attendance/summary")
                    .route(web::get().to(attendance::attendance_summary)),
            ),
    );
}
