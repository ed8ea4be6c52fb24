use crate::config::Config;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{self, HeaderMap, HeaderValue},
    },
    middleware::Next,
    web::Data,
};
use serde_json::json;
use tracing::debug;

const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const PREFLIGHT_MAX_AGE: &str = "600";

/// Origin allow-list check at the transport boundary.
///
/// Preflights are answered here and never reach the router. Simple requests
/// from a disallowed origin are served without CORS headers, so the browser
/// withholds the response.
pub async fn cors_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let origin = match req.headers().get(header::ORIGIN) {
        Some(value) => value.clone(),
        None => return next.call(req).await,
    };

    let allowed = match (req.app_data::<Data<Config>>(), origin.to_str()) {
        (Some(config), Ok(origin)) => config.allowed_origins.allows(origin),
        _ => false,
    };

    let preflight = *req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    if preflight {
        if !allowed {
            debug!(origin = ?origin, "Rejected CORS preflight");
            let resp = HttpResponse::BadRequest().json(json!({"detail": "Disallowed CORS origin"}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }

        let request_headers = req
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned();

        let mut resp = HttpResponse::Ok();
        resp.insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
            .insert_header((header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE));
        if let Some(requested) = request_headers {
            resp.insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, requested));
        }
        let mut resp = resp.finish();
        apply_origin_headers(resp.headers_mut(), origin);
        return Ok(req.into_response(resp));
    }

    let mut res = next.call(req).await?;
    if allowed {
        apply_origin_headers(res.headers_mut(), origin);
    }
    Ok(res)
}

fn apply_origin_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}
