//! # SG Telemetry
//!
//! Structured logging for the social-graph ledger.
//!
//! The ledger itself only emits `tracing` spans and events; hosts call
//! [`init_logging`] once at start-up to decide where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sg_telemetry::{init_logging, TelemetryConfig};
//!
//! let _guard = init_logging(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SG_SERVICE_NAME` | `sg-ledger` | Service name in log lines |
//! | `SG_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `SG_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `SG_LOG_TARGETS` | `true` | Include module targets |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Filter directives did not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for creating a span around a ledger operation.
///
/// ```rust,ignore
/// let _span = sg_telemetry::operation_span!("follow", follower = %caller).entered();
/// ```
#[macro_export]
macro_rules! operation_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!("ledger_op", op = $name $(, $($field)*)?)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TelemetryError::Config("bad directive".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad directive");
    }

    #[test]
    fn test_macros_expand_without_subscriber() {
        let span = operation_span!("post", profile_id = 1u64);
        let _entered = span.enter();
        crate::log_event!(info, "sg-ledger", "published", pub_id = 7u64);
    }
}
