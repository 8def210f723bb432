//! Structured logging.
//!
//! JSON output carries these fields on every line:
//! - `timestamp`: RFC 3339 timestamp
//! - `level`: trace, debug, info, warn, error
//! - `target`: emitting module path
//! - `span`: the current span and its recorded fields (operation name,
//!   caller, profile id)
//! - `fields`: the event's message and context fields

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Held for the lifetime of the process once logging is installed.
#[derive(Debug)]
pub struct LoggingGuard {
    service_name: String,
}

impl LoggingGuard {
    /// Service name the subscriber was installed for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Logging guard dropped");
    }
}

/// Parses the configured filter directives.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Installs the global subscriber.
///
/// Fails with [`TelemetryError::SubscriberInit`] if a global subscriber is
/// already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(config.with_targets),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(config.with_targets))
            .try_init()
    };
    installed.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        filter = %config.log_level,
        json = config.json_logs,
        "Logging initialised"
    );

    Ok(LoggingGuard {
        service_name: config.service_name.clone(),
    })
}

/// Helper to create structured log entries with a `component` field.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(component = $component, $($($field)*,)? $msg)
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(component = $component, $($($field)*,)? $msg)
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(component = $component, $($($field)*,)? $msg)
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(component = $component, $($($field)*,)? $msg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let config = TelemetryConfig::default().with_log_level("warn,sg_ledger=debug");
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_filter_rejects_bad_level() {
        let config = TelemetryConfig::default().with_log_level("sg_ledger=loud");
        assert!(matches!(build_filter(&config), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_second_install_fails() {
        let config = TelemetryConfig::default().with_log_level("off");
        let _first = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInit(_))
        ));
    }
}
