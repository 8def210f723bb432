//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// `EnvFilter` directives (e.g. `info,sg_ledger=debug`)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Include the event target (module path) in output
    pub with_targets: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "sg-ledger".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_targets: true,
        }
    }
}

fn flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SG_SERVICE_NAME`: Service name (default: sg-ledger)
    /// - `SG_LOG_LEVEL` or `RUST_LOG`: Filter directives (default: info)
    /// - `SG_JSON_LOGS`: Enable JSON logs (default: true inside containers)
    /// - `SG_LOG_TARGETS`: Include targets (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("SG_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("SG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            json_logs: lookup("SG_JSON_LOGS").map_or(is_container, |v| flag(&v)),
            with_targets: lookup("SG_LOG_TARGETS")
                .map_or(defaults.with_targets, |v| !v.eq_ignore_ascii_case("false") && v != "0"),
        }
    }

    /// Returns a copy with `directives` as the filter.
    #[must_use]
    pub fn with_log_level(mut self, directives: impl Into<String>) -> Self {
        self.log_level = directives.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TelemetryConfig::default());
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_sg_log_level_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("SG_LOG_LEVEL", "sg_ledger=debug"),
        ]));
        assert_eq!(config.log_level, "sg_ledger=debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_json_logs_in_containers() {
        let config = TelemetryConfig::from_lookup(lookup(&[("DOCKER_CONTAINER", "1")]));
        assert!(config.json_logs);

        let config = TelemetryConfig::from_lookup(lookup(&[
            ("DOCKER_CONTAINER", "1"),
            ("SG_JSON_LOGS", "false"),
        ]));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_targets_toggle() {
        let config = TelemetryConfig::from_lookup(lookup(&[("SG_LOG_TARGETS", "0")]));
        assert!(!config.with_targets);
    }
}
