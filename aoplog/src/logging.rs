//! Subscriber setup for the `tracing` backend.
//!
//! # Separation of Concerns
//!
//! - **Advice lines**: emitted through [`crate::io::sink::TracingSink`] on
//!   target `aoplog`, gated by the interceptor's own severity.
//! - **Subscriber (this module)**: decides what reaches stderr. `RUST_LOG`
//!   wins over the configured fallback directive.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Falls back to `default_directive` if unset or
/// invalid. Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=aoplog=debug cargo run -p aoplog -- run
/// ```
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
