//! HTTP response building module
//!
//! Provides builders for the probe's responses, decoupled from specific
//! business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a JSON response from a serializable payload
///
/// Serialization of the probe payloads cannot fail in practice; if it ever
/// does the failure is logged and a 500 JSON body is returned instead.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    payload: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(payload) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };

    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response listing the probe's endpoints
pub fn build_404_response(available_endpoints: &[&str]) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "available_endpoints": available_endpoints,
    });
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not Found")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error":"Internal Server Error"}"#,
        )))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build health check response
pub fn build_health_response(status_text: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = status_text.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(status_text.as_bytes())
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
