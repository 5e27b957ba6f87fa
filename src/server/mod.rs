// Server module entry
// Listener setup, accept loop, connection serving, and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::bind_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
