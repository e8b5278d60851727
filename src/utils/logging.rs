//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` formatter from a [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{constants, ProtocolError, Result};

/// Build the filter used by [`init`]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()))
}

/// Install the global subscriber.
///
/// # Errors
/// Returns `ProtocolError::ConfigError` if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|_| ProtocolError::ConfigError(constants::ERR_SUBSCRIBER_INSTALLED.into()))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}
