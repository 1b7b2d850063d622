//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tally_core::validation::CategoryInput;
use tally_db::{CategoryRepository, entities::categories};

use super::{DeletedResponse, path_id, timestamp};
use crate::{AppState, error::ApiResult};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: i32,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            created_at: timestamp(model.created_at),
            updated_at: timestamp(model.updated_at),
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let repo = CategoryRepository::new((*state.db).clone());
    let categories = repo.list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /categories/{id}
async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<CategoryResponse>> {
    let id = path_id(path, "category")?;
    let repo = CategoryRepository::new((*state.db).clone());
    Ok(Json(repo.get(id).await?.into()))
}

/// POST /categories
async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let Json(input) = payload?;
    let repo = CategoryRepository::new((*state.db).clone());
    let category = repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT /categories/{id}
async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<CategoryResponse>> {
    let id = path_id(path, "category")?;
    let Json(input) = payload?;
    let repo = CategoryRepository::new((*state.db).clone());
    Ok(Json(repo.update(id, input).await?.into()))
}

/// DELETE /categories/{id}
async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeletedResponse<CategoryResponse>>> {
    let id = path_id(path, "category")?;
    let repo = CategoryRepository::new((*state.db).clone());
    let deleted = repo.delete(id).await?;
    Ok(Json(DeletedResponse::new("Category", deleted.into())))
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
