//! Probe endpoint handlers
//!
//! The two measured endpoints: a CPU-bound prime computation and a fixed
//! asynchronous delay standing in for blocking I/O. Both build a fresh typed
//! payload per request; nothing is shared or cached between invocations.

use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::primes;

/// Response payload for the CPU-bound endpoint
///
/// Field casing is part of the wire contract shared with the sibling probe
/// implementations, hence the PascalCase rename.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeavyResponse {
    pub message: String,
    pub result: u64,
    pub duration_ms: f64,
    pub platform: String,
}

/// Response payload for the simulated-I/O endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IoResponse {
    pub message: String,
    pub platform: String,
}

/// Handle the CPU-bound probe endpoint
///
/// Computes the configured prime ordinal synchronously on the current
/// worker and reports the measured wall-clock duration. A zero ordinal can
/// only come from misconfiguration and is surfaced as a 500 rather than the
/// reference implementation's silent wrong answer.
pub fn handle_heavy(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    let ordinal = state.config.bench.prime_ordinal;
    let start = Instant::now();

    match primes::nth_prime(ordinal) {
        Ok(prime) => {
            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
            let payload = HeavyResponse {
                message: format!("Found {ordinal}th prime number"),
                result: prime,
                duration_ms,
                platform: state.config.bench.platform.clone(),
            };
            http::build_json_response(StatusCode::OK, &payload, is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Heavy endpoint misconfigured: {e}"));
            http::build_500_response()
        }
    }
}

/// Handle the simulated-I/O probe endpoint
///
/// Suspends on the tokio timer for the configured delay, yielding the
/// worker thread for the whole interval, then reports completion.
pub async fn handle_io(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    tokio::time::sleep(state.io_delay).await;

    let payload = IoResponse {
        message: "I/O Operation Complete".to_string(),
        platform: state.config.bench.platform.clone(),
    };
    http::build_json_response(StatusCode::OK, &payload, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use std::time::Duration;

    fn test_state(tweak: impl FnOnce(&mut Config)) -> Arc<AppState> {
        let mut config = Config::load_from("config_missing_for_tests")
            .expect("defaults should deserialize");
        tweak(&mut config);
        Arc::new(AppState::new(config))
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_heavy_payload_wire_shape() {
        let payload = HeavyResponse {
            message: "Found 6th prime number".to_string(),
            result: 13,
            duration_ms: 0.25,
            platform: "Rust".to_string(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&payload).unwrap()).unwrap();
        assert_eq!(json["Message"], "Found 6th prime number");
        assert_eq!(json["Result"], 13);
        assert!(json["DurationMs"].is_f64());
        assert_eq!(json["Platform"], "Rust");
    }

    #[test]
    fn test_io_payload_wire_shape() {
        let payload = IoResponse {
            message: "I/O Operation Complete".to_string(),
            platform: "Rust".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"Message":"I/O Operation Complete","Platform":"Rust"}"#
        );
    }

    #[tokio::test]
    async fn test_heavy_handler_reports_configured_ordinal() {
        let state = test_state(|c| c.bench.prime_ordinal = 6);
        let response = handle_heavy(&state, false);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");

        let json = body_json(response).await;
        assert_eq!(json["Message"], "Found 6th prime number");
        assert_eq!(json["Result"], 13);
        assert!(json["DurationMs"].as_f64().unwrap() >= 0.0);
        assert_eq!(json["Platform"], "Rust");
    }

    #[tokio::test]
    async fn test_heavy_handler_rejects_zero_ordinal() {
        let state = test_state(|c| c.bench.prime_ordinal = 0);
        let response = handle_heavy(&state, false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_heavy_handler_head_omits_body() {
        let state = test_state(|c| c.bench.prime_ordinal = 6);
        let response = handle_heavy(&state, true);
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_handlers_do_not_interfere() {
        let state = test_state(|c| {
            c.bench.prime_ordinal = 100;
            c.bench.io_delay_ms = 10;
        });

        let (heavy, io) = tokio::join!(
            async { handle_heavy(&state, false) },
            handle_io(&state, false),
        );

        let heavy_json = body_json(heavy).await;
        let io_json = body_json(io).await;
        assert_eq!(heavy_json["Result"], 541); // 100th prime
        assert_eq!(io_json["Message"], "I/O Operation Complete");
    }

    #[tokio::test]
    async fn test_io_handler_waits_configured_delay() {
        let state = test_state(|c| c.bench.io_delay_ms = 20);
        let start = Instant::now();
        let response = handle_io(&state, false).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");

        let json = body_json(response).await;
        assert_eq!(json["Message"], "I/O Operation Complete");
        assert_eq!(json["Platform"], "Rust");
    }
}
