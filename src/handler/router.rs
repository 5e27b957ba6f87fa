//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, probe handler
//! dispatch, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::{AppState, Config};
use crate::handler::bench;
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;

/// Resolved probe route for an incoming path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRoute {
    Heavy,
    Io,
    Liveness,
    Readiness,
    NotFound,
}

/// Match a request path against the configured routes
///
/// Probe routes are exact matches and accept any method, matching the
/// reference servers the harness compares against. Health probes can be
/// disabled entirely, in which case their paths fall through to 404.
pub fn resolve_route(path: &str, config: &Config) -> ProbeRoute {
    if path == config.bench.heavy_path {
        return ProbeRoute::Heavy;
    }
    if path == config.bench.io_path {
        return ProbeRoute::Io;
    }
    if config.routes.health.enabled {
        if path == config.routes.health.liveness_path {
            return ProbeRoute::Liveness;
        }
        if path == config.routes.health.readiness_path {
            return ProbeRoute::Readiness;
        }
    }
    ProbeRoute::NotFound
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    // Request bodies are ignored by contract; drop the stream unread.
    drop(req);

    let response = match resolve_route(&path, &state.config) {
        ProbeRoute::Heavy => bench::handle_heavy(&state, is_head),
        ProbeRoute::Io => bench::handle_io(&state, is_head).await,
        ProbeRoute::Liveness | ProbeRoute::Readiness => http::build_health_response("ok", is_head),
        ProbeRoute::NotFound => http::build_404_response(&[
            state.config.bench.heavy_path.as_str(),
            state.config.bench.io_path.as_str(),
        ]),
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Body size as declared by the response builder, for access logging
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::load_from("config_missing_for_tests").expect("defaults should deserialize")
    }

    #[test]
    fn test_probe_routes_match_exactly() {
        let config = test_config();
        assert_eq!(resolve_route("/heavy", &config), ProbeRoute::Heavy);
        assert_eq!(resolve_route("/io", &config), ProbeRoute::Io);
        assert_eq!(resolve_route("/heavy/", &config), ProbeRoute::NotFound);
        assert_eq!(resolve_route("/heavy/extra", &config), ProbeRoute::NotFound);
        assert_eq!(resolve_route("/", &config), ProbeRoute::NotFound);
    }

    #[test]
    fn test_health_routes() {
        let config = test_config();
        assert_eq!(resolve_route("/healthz", &config), ProbeRoute::Liveness);
        assert_eq!(resolve_route("/readyz", &config), ProbeRoute::Readiness);
    }

    #[test]
    fn test_disabled_health_falls_through_to_404() {
        let mut config = test_config();
        config.routes.health.enabled = false;
        assert_eq!(resolve_route("/healthz", &config), ProbeRoute::NotFound);
        assert_eq!(resolve_route("/readyz", &config), ProbeRoute::NotFound);
    }

    #[test]
    fn test_configured_paths_take_effect() {
        let mut config = test_config();
        config.bench.heavy_path = "/cpu".to_string();
        assert_eq!(resolve_route("/cpu", &config), ProbeRoute::Heavy);
        assert_eq!(resolve_route("/heavy", &config), ProbeRoute::NotFound);
    }
}
