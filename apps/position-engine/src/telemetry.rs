//! Tracing subscriber setup.
//!
//! Console logging with `RUST_LOG`-style filtering. Embedding services own
//! their subscriber; this helper exists for binaries and tests that want
//! the engine's default format.
//!
//! # Usage
//!
//! ```rust,ignore
//! use position_engine::telemetry::init_tracing;
//!
//! fn main() {
//!     init_tracing();
//!     // ... application code
//! }
//! ```

use tracing_subscriber::EnvFilter;

/// Initialize console tracing with an environment-driven filter.
///
/// Falls back to `info` when `RUST_LOG` is unset. Safe to call more than
/// once; subsequent calls are no-ops.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
