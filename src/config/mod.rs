// Configuration module entry point
// Loads startup configuration and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    BenchConfig, Config, HealthConfig, LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig,
};

impl Config {
    /// Load configuration from "config.toml" in the working directory,
    /// falling back to built-in defaults when the file is absent
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension),
    /// with `SERVER`-prefixed environment variables layered on top
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("bench.prime_ordinal", 20_000)?
            .set_default("bench.io_delay_ms", 100)?
            .set_default("bench.platform", "Rust")?
            .set_default("bench.heavy_path", "/heavy")?
            .set_default("bench.io_path", "/io")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 0)?
            .set_default("performance.write_timeout", 0)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        // Path that never exists, so only built-in defaults apply
        Config::load_from("config_defaults_only_for_tests").expect("defaults should deserialize")
    }

    #[test]
    fn test_default_bind_address() {
        let cfg = defaults();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_default_workload() {
        let cfg = defaults();
        assert_eq!(cfg.bench.prime_ordinal, 20_000);
        assert_eq!(cfg.bench.io_delay_ms, 100);
        assert_eq!(cfg.bench.platform, "Rust");
        assert_eq!(cfg.bench.heavy_path, "/heavy");
        assert_eq!(cfg.bench.io_path, "/io");
    }

    #[test]
    fn test_default_health_routes() {
        let cfg = defaults();
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.routes.health.readiness_path, "/readyz");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut cfg = defaults();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
