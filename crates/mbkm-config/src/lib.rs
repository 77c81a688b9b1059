//! # MBKM Config
//!
//! Configuration types for the MBKM API, loaded from environment variables
//! once at startup and passed explicitly to whatever needs them:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: PostgreSQL connection string and pool limits
//! - [`server`]: bind address
//! - [`cors`]: allowed browser origins
//! - [`observability`]: log level, log directory, metrics and OTLP export
//!
//! Every type has a `from_env()` constructor and a `from_source()`
//! constructor taking a key lookup function, which keeps tests free of
//! process-wide environment mutation.
//!
//! # Example
//!
//! ```ignore
//! use mbkm_config::{DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let db_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod observability;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use observability::ObservabilityConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL or DB_HOST/DB_USER/DB_NAME must be set")]
    MissingDatabase,
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key` through `source` and parses it, falling back to `default`
/// when the variable is unset. A present but unparseable value is an error.
pub(crate) fn parse_or<F, T>(source: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match source(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
