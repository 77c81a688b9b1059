//! # MBKM DB
//!
//! Database pool initialization and store error classification.
//!
//! - [`init_db_pool`]: builds a [`PgPool`] from [`DatabaseConfig`]
//! - [`constraint`]: maps PostgreSQL constraint violations to typed kinds and
//!   then to HTTP errors
//!
//! # Example
//!
//! ```ignore
//! use mbkm_config::DatabaseConfig;
//! use mbkm_db::{ConstraintExt, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//!
//! sqlx::query("INSERT INTO programs (code, name, semester, lecturer_id) VALUES ($1, $2, $3, $4)")
//!     .bind(code)
//!     .bind(name)
//!     .bind(semester)
//!     .bind(lecturer_id)
//!     .execute(&pool)
//!     .await
//!     .or_conflict("Program code already exists", "Lecturer not found")?;
//! ```

pub mod constraint;

use mbkm_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use constraint::{ConstraintExt, ConstraintViolation, ViolationKind};
// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Creates the connection pool shared by every request handler.
///
/// Fails if no connection can be established within the acquire timeout.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool established"
    );

    Ok(pool)
}
