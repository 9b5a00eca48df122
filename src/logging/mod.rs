// Logging module for structured logging using the tracing crate

use std::error::Error;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Build the event filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber.
///
/// Events go to stderr so the command-line output on stdout stays clean.
/// JSON output is meant for log aggregation, pretty output for humans.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place and return Ok.
///
/// # Examples
///
/// ```
/// use imgframe::config::LoggingConfig;
/// use imgframe::logging::init_subscriber;
///
/// init_subscriber(&LoggingConfig::default()).unwrap();
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Json => fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .try_init(),
        LogFormat::Pretty => fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .try_init(),
    };

    if let Err(e) = result {
        // A subscriber is already installed (tests, embedding applications)
        tracing::debug!(error = %e, "Tracing subscriber already initialized");
    }
    Ok(())
}
