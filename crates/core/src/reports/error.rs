//! Report error types.

use thiserror::Error;

use crate::month::MonthParseError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// No month was supplied.
    #[error("Month parameter is required")]
    MissingMonth,

    /// The month token could not be parsed.
    #[error("{0}")]
    InvalidMonth(#[from] MonthParseError),
}
