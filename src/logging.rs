//! Tracing subscriber setup shared by the binaries.
//!
//! Logs go to stderr so that stdout carries only the cloud JSON.

use std::io;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_env_filter(default_filter))
        .with(fmt::layer().compact().with_writer(io::stderr).with_target(false))
        .try_init()
}

fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
