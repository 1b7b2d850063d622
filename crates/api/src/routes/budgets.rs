//! Budget management routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use serde::Serialize;
use tally_core::validation::{BudgetAmountInput, BudgetInput};
use tally_db::{BudgetRepository, BudgetWithCategory};
use tally_shared::Money;

use super::{DeletedResponse, path_id, timestamp};
use crate::{AppState, error::ApiResult};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: i32,
    /// Category ID.
    pub category_id: i32,
    /// Category name.
    pub category_name: String,
    /// Budgeted amount, two decimal places.
    pub amount: Money,
    /// First day of the budgeted month.
    pub month: NaiveDate,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<BudgetWithCategory> for BudgetResponse {
    fn from(row: BudgetWithCategory) -> Self {
        let budget = row.budget;
        Self {
            id: budget.id,
            category_id: budget.category_id,
            category_name: row.category_name,
            amount: Money::new(budget.amount),
            month: budget.month,
            created_at: timestamp(budget.created_at),
            updated_at: timestamp(budget.updated_at),
        }
    }
}

/// GET /budgets
async fn list_budgets(State(state): State<AppState>) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let repo = BudgetRepository::new((*state.db).clone());
    let budgets = repo.list().await?;
    Ok(Json(budgets.into_iter().map(Into::into).collect()))
}

/// POST /budgets
async fn create_budget(
    State(state): State<AppState>,
    payload: Result<Json<BudgetInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    let Json(input) = payload?;
    let repo = BudgetRepository::new((*state.db).clone());
    let budget = repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(budget.into())))
}

/// PUT /budgets/{id}
///
/// Only the amount is read from the body; category and month stay fixed.
async fn update_budget(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BudgetAmountInput>, JsonRejection>,
) -> ApiResult<Json<BudgetResponse>> {
    let id = path_id(path, "budget")?;
    let Json(input) = payload?;
    let repo = BudgetRepository::new((*state.db).clone());
    Ok(Json(repo.update(id, input).await?.into()))
}

/// DELETE /budgets/{id}
async fn delete_budget(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeletedResponse<BudgetResponse>>> {
    let id = path_id(path, "budget")?;
    let repo = BudgetRepository::new((*state.db).clone());
    let deleted = repo.delete(id).await?;
    Ok(Json(DeletedResponse::new("Budget", deleted.into())))
}

#[cfg(test)]
#[path = "budgets_tests.rs"]
mod tests;
