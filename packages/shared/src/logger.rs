//! Logging setup utilities for the Hearth chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the `hearth_server` crate and the running binary log at
/// `default_log_level`. The `RUST_LOG` environment variable overrides it.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hearth_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hearth_shared::logger::setup_logger;
///
/// setup_logger("hearth_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the fallback filter directives used when `RUST_LOG` is unset.
fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "hearth_server={level},hearth_shared={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}
