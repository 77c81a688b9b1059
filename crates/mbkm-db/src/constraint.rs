//! Typed classification of PostgreSQL constraint violations.
//!
//! Handlers check referenced rows before writing, but the schema constraints
//! stay the final arbiter. When a write trips one, the resulting
//! [`sqlx::Error`] is classified here through [`sqlx::error::ErrorKind`]
//! rather than by inspecting message text.

use mbkm_core::AppError;
use sqlx::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl ViolationKind {
    pub fn from_error_kind(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::UniqueViolation => Some(ViolationKind::Unique),
            ErrorKind::ForeignKeyViolation => Some(ViolationKind::ForeignKey),
            ErrorKind::CheckViolation => Some(ViolationKind::Check),
            ErrorKind::NotNullViolation => Some(ViolationKind::NotNull),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    /// Name of the violated constraint, when the server reports it.
    pub constraint: Option<String>,
}

impl ConstraintViolation {
    /// Returns `None` for anything that is not a constraint violation
    /// (connection failures, missing rows, decode errors, ...).
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        let db_err = err.as_database_error()?;
        let kind = ViolationKind::from_error_kind(db_err.kind())?;
        Some(Self {
            kind,
            constraint: db_err.constraint().map(str::to_owned),
        })
    }

    /// Maps the violation to a client error. Unique and foreign key
    /// violations become 409 with the supplied messages; check and not-null
    /// violations become 400.
    pub fn into_app_error(self, unique_msg: &str, fk_msg: &str) -> AppError {
        match self.kind {
            ViolationKind::Unique => AppError::conflict(anyhow::anyhow!(unique_msg.to_string())),
            ViolationKind::ForeignKey => AppError::conflict(anyhow::anyhow!(fk_msg.to_string())),
            ViolationKind::Check | ViolationKind::NotNull => {
                let detail = match self.constraint {
                    Some(name) => format!("Value violates constraint {name}"),
                    None => "Value violates a data constraint".to_string(),
                };
                AppError::bad_request(anyhow::anyhow!(detail))
            }
        }
    }
}

const GENERIC_CONFLICT: &str = "Request conflicts with existing data";

/// Extension for query results that turns constraint violations into
/// [`AppError`]s and passes every other error through `AppError::from`.
pub trait ConstraintExt<T> {
    fn or_conflict(self, unique_msg: &str, fk_msg: &str) -> Result<T, AppError>;

    /// For deletes, where the only expected violation is a row still being
    /// referenced through a foreign key.
    fn or_referenced(self, fk_msg: &str) -> Result<T, AppError>;
}

impl<T> ConstraintExt<T> for Result<T, sqlx::Error> {
    fn or_conflict(self, unique_msg: &str, fk_msg: &str) -> Result<T, AppError> {
        self.map_err(|err| match ConstraintViolation::classify(&err) {
            Some(violation) => {
                tracing::debug!(?violation, "Constraint violation");
                violation.into_app_error(unique_msg, fk_msg)
            }
            None => AppError::from(err),
        })
    }

    fn or_referenced(self, fk_msg: &str) -> Result<T, AppError> {
        self.or_conflict(GENERIC_CONFLICT, fk_msg)
    }
}
