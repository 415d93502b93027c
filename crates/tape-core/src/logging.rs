//! Logging initialization using the `tracing` ecosystem.
//!
//! Provides:
//! - Console output (colored, human-readable)
//! - Optional file output (daily rotation via `tracing-appender`)
//! - Level selection via the `RUST_LOG` env var or an explicit default
//!
//! Every error in the pipeline surfaces as a log line; there is no
//! structured error reporting channel beyond this.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at program start, before any connection activity.
///
/// # Parameters
///
/// - `log_level`: default level if `RUST_LOG` is not set (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `module_name`: log file prefix (e.g. `"tape-runner"`)
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, module_name);
        let file_layer =
            fmt::layer().with_writer(file_appender).with_ansi(false).with_target(true);

        tracing_subscriber::registry().with(env_filter).with(console_layer).with(file_layer).init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(console_layer).init();
    }
}
