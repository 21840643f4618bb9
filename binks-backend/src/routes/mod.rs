//! HTTP route handlers and response helpers

pub mod disposals;
pub mod health;
pub mod initiatives;
pub mod rewards;

pub use disposals::handle_disposals;
pub use health::health_check;
pub use initiatives::{handle_get_initiative, handle_list_initiatives};
pub use rewards::{handle_factors, handle_materials, handle_quote};

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::types::BackendError;

const ROOT_MESSAGE: &str = "Binks Backend API is running!";

/// Build a response with the CORS header every route carries
fn build_response(
    status: StatusCode,
    content_type: &'static str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

/// Serialize `value` as a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => build_response(status, "application/json", Bytes::from(body)),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            error_response(BackendError::Internal("Failed to serialize response".to_string()))
        }
    }
}

/// JSON error body for a backend error
pub fn error_response(err: BackendError) -> Response<Full<Bytes>> {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}", err);
    } else {
        warn!("{}", err);
    }

    let body = serde_json::json!({
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": err.to_string(),
    });
    build_response(status, "application/json", Bytes::from(body.to_string()))
}

/// Liveness banner at `/`
pub fn root_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::OK,
        "text/plain; charset=utf-8",
        Bytes::from_static(ROOT_MESSAGE.as_bytes()),
    )
}

/// CORS preflight response
pub fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = build_response(StatusCode::OK, "text/plain; charset=utf-8", Bytes::new());
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Headers", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static("GET, POST, OPTIONS"));
    response
}

/// Not found response
pub fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });
    build_response(StatusCode::NOT_FOUND, "application/json", Bytes::from(body.to_string()))
}
