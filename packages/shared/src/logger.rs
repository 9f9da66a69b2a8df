//! Logging setup utilities for the dashboard.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for both the calling crate and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
/// Output goes to stderr so that it does not interleave with the dashboard
/// lines printed on stdout.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "sweetdash")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use sweetdash_shared::logger::setup_logger;
///
/// setup_logger("sweetdash", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Covers the client library crate and the binary itself.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "sweetdash_client={},sweetdash_shared={},{}={}",
        default_log_level,
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}
