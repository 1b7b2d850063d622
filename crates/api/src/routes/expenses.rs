//! Expense management routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use serde::Serialize;
use tally_core::validation::ExpenseInput;
use tally_db::{ExpenseRepository, ExpenseWithCategory};
use tally_shared::Money;

use super::{DeletedResponse, path_id, timestamp};
use crate::{AppState, error::ApiResult};

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: i32,
    /// Amount, two decimal places.
    pub amount: Money,
    /// Category ID.
    pub category_id: i32,
    /// Category name.
    pub category_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Expense date.
    pub date: NaiveDate,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<ExpenseWithCategory> for ExpenseResponse {
    fn from(row: ExpenseWithCategory) -> Self {
        let expense = row.expense;
        Self {
            id: expense.id,
            amount: Money::new(expense.amount),
            category_id: expense.category_id,
            category_name: row.category_name,
            description: expense.description,
            date: expense.date,
            created_at: timestamp(expense.created_at),
            updated_at: timestamp(expense.updated_at),
        }
    }
}

/// GET /expenses
async fn list_expenses(State(state): State<AppState>) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let repo = ExpenseRepository::new((*state.db).clone());
    let expenses = repo.list().await?;
    Ok(Json(expenses.into_iter().map(Into::into).collect()))
}

/// POST /expenses
async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ExpenseResponse>)> {
    let Json(input) = payload?;
    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(expense.into())))
}

/// PUT /expenses/{id}
async fn update_expense(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> ApiResult<Json<ExpenseResponse>> {
    let id = path_id(path, "expense")?;
    let Json(input) = payload?;
    let repo = ExpenseRepository::new((*state.db).clone());
    Ok(Json(repo.update(id, input).await?.into()))
}

/// DELETE /expenses/{id}
async fn delete_expense(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeletedResponse<ExpenseResponse>>> {
    let id = path_id(path, "expense")?;
    let repo = ExpenseRepository::new((*state.db).clone());
    let deleted = repo.delete(id).await?;
    Ok(Json(DeletedResponse::new("Expense", deleted.into())))
}

#[cfg(test)]
#[path = "expenses_tests.rs"]
mod tests;
