// Application state module
// Read-only runtime state shared by every connection task

use std::time::Duration;

use super::types::Config;

/// Application state
///
/// The probe has no runtime-mutable configuration; every request sees the
/// same immutable snapshot, which is what makes the handlers lock-free.
pub struct AppState {
    pub config: Config,
    /// Simulated I/O delay, resolved once at startup
    pub io_delay: Duration,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let io_delay = Duration::from_millis(config.bench.io_delay_ms);
        Self { config, io_delay }
    }
}
