use std::env;

#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `mbkm=debug,sqlx=warn`.
    pub log_level: String,
    pub log_dir: String,
    pub metrics_enabled: bool,
    pub otlp_endpoint: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(source: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: source("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_dir: source("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            metrics_enabled: source("METRICS_ENABLED")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(true),
            otlp_endpoint: source("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup;

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::from_source(lookup(&[]));
        assert_eq!(config.log_level, "info");
        assert!(config.metrics_enabled);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_metrics_can_be_disabled() {
        let config = ObservabilityConfig::from_source(lookup(&[("METRICS_ENABLED", "false")]));
        assert!(!config.metrics_enabled);
    }
}
