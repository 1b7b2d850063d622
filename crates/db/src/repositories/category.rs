//! Category repository for category database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tally_core::validation::{CategoryInput, require_id};
use tracing::info;

use crate::entities::{budgets, categories, expenses};
use crate::error::{Constraint, StoreError, StoreResult, classify};

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> StoreResult<Vec<categories::Model>> {
        let rows = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has this ID.
    pub async fn get(&self, id: i32) -> StoreResult<categories::Model> {
        require_id(id, "category")?;
        categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound("Category"))
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or out-of-bounds name or an
    /// overlong description.
    pub async fn create(&self, input: CategoryInput) -> StoreResult<categories::Model> {
        let new = input.validate_input()?;
        let now = Utc::now().into();

        let category = categories::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Replaces a category's name and description.
    ///
    /// # Errors
    ///
    /// Returns a validation error as for `create`, or `NotFound`.
    pub async fn update(&self, id: i32, input: CategoryInput) -> StoreResult<categories::Model> {
        require_id(id, "category")?;
        let new = input.validate_input()?;
        let existing = self.get(id).await?;

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(new.name);
        active.description = Set(new.description);
        active.updated_at = Set(Utc::now().into());
        let category = active.update(&self.db).await?;

        info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Deletes a category and returns it.
    ///
    /// Categories still referenced by expenses or budgets are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, or `Constraint` while dependents exist.
    pub async fn delete(&self, id: i32) -> StoreResult<categories::Model> {
        let category = self.get(id).await?;

        let expense_count = expenses::Entity::find()
            .filter(expenses::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        let budget_count = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if expense_count > 0 || budget_count > 0 {
            return Err(in_use(expense_count, budget_count));
        }

        // A dependent inserted after the counts still trips the foreign key
        match category.clone().delete(&self.db).await {
            Ok(_) => {}
            Err(e) if classify(&e) == Some(Constraint::ForeignKey) => {
                return Err(StoreError::Constraint(
                    "Category is still referenced by expenses or budgets".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        info!(category_id = %id, "Category deleted");
        Ok(category)
    }
}

fn in_use(expenses: u64, budgets: u64) -> StoreError {
    StoreError::Constraint(format!(
        "Category is in use by {expenses} expense(s) and {budgets} budget(s)"
    ))
}
