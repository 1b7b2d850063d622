//! Store errors and database constraint classification.

use sea_orm::{DbErr, SqlErr};
use tally_core::ValidationError;
use tally_core::reports::ReportError;
use tally_shared::AppError;
use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Row not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Referenced category does not exist.
    #[error("Category {0} does not exist")]
    InvalidReference(i32),

    /// Row conflicts with an existing one.
    #[error("{0}")]
    Duplicate(String),

    /// Row is still referenced by dependents.
    #[error("{0}")]
    Constraint(String),

    /// Report month missing or malformed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => Self::Validation(e.message),
            StoreError::Report(e) => Self::Validation(e.to_string()),
            StoreError::NotFound(entity) => Self::NotFound(format!("{entity} not found")),
            StoreError::InvalidReference(id) => {
                Self::InvalidReference(format!("Category {id} does not exist"))
            }
            StoreError::Duplicate(msg) => Self::Duplicate(msg),
            StoreError::Constraint(msg) => Self::Constraint(msg),
            StoreError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Backend-independent kinds of constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Unique index or primary key collision.
    Unique,
    /// Foreign key target missing, or row still referenced.
    ForeignKey,
}

/// Classifies a database error as a constraint violation.
///
/// Uses the driver's error code, so it recognizes the same violation on
/// `PostgreSQL` (`23505`, `23503`) and `SQLite` (`2067`, `787`).
#[must_use]
pub fn classify(err: &DbErr) -> Option<Constraint> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(_) => Some(Constraint::Unique),
        SqlErr::ForeignKeyConstraintViolation(_) => Some(Constraint::ForeignKey),
        _ => None,
    }
}
