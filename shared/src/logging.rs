//! Shared logging utilities for consistent tracing across the client crates

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Filter directive applied when no `RUST_LOG` is set
pub fn default_filter(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("orchestrator={base_level},taranis_load={base_level},shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize the stdout tracing subscriber.
///
/// `RUST_LOG` wins over the supplied level when present.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    // try_init so tests and embedders can call this more than once
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for request-aware info logging
#[macro_export]
macro_rules! dispatch_info {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::info!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for request-aware warning logging
#[macro_export]
macro_rules! dispatch_warn {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for request-aware error logging
#[macro_export]
macro_rules! dispatch_error {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::error!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for request-aware debug logging
#[macro_export]
macro_rules! dispatch_debug {
    ($request_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            request = %$request_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = format_timestamp(), "✅ {}", message);
}
