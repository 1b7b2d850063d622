//! API route definitions.

use axum::{Router, extract::Path, extract::rejection::PathRejection};
use serde::Serialize;
use tally_core::validation::require_id;

use crate::{AppState, error::ApiError};

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(categories::routes())
        .merge(expenses::routes())
        .merge(budgets::routes())
        .merge(reports::routes())
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}

/// Response for a delete: the removed row and a confirmation.
#[derive(Debug, Serialize)]
pub struct DeletedResponse<T> {
    /// Confirmation message.
    pub message: String,
    /// The deleted row.
    pub data: T,
}

impl<T> DeletedResponse<T> {
    fn new(entity: &str, data: T) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
            data,
        }
    }
}

/// Reads a positive integer id from the path.
fn path_id(path: Result<Path<i32>, PathRejection>, entity: &str) -> Result<i32, ApiError> {
    let Ok(Path(id)) = path else {
        return Err(tally_core::ValidationError::new("id", format!("Invalid {entity} ID")).into());
    };
    Ok(require_id(id, entity)?)
}

/// Formats a stored timestamp for responses.
fn timestamp(at: sea_orm::prelude::DateTimeWithTimeZone) -> String {
    at.to_rfc3339()
}
