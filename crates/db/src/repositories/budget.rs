//! Budget repository for budget database operations.
//!
//! A budget caps spending for one category in one calendar month. The month
//! is stored as its first day and, together with the category, is fixed once
//! the budget exists; only the amount can change.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tally_core::validation::{BudgetAmountInput, BudgetInput, NewBudget, require_id};
use tracing::{info, warn};

use super::expense::reference_error;
use crate::entities::{budgets, categories};
use crate::error::{Constraint, StoreError, StoreResult, classify};

/// Budget joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetWithCategory {
    /// Budget record.
    pub budget: budgets::Model,
    /// Name of the referenced category.
    pub category_name: String,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all budgets, newest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> StoreResult<Vec<BudgetWithCategory>> {
        let rows = budgets::Entity::find()
            .find_also_related(categories::Entity)
            .order_by_desc(budgets::Column::Month)
            .order_by_asc(budgets::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(with_category).collect())
    }

    /// Finds a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no budget has this ID.
    pub async fn get(&self, id: i32) -> StoreResult<BudgetWithCategory> {
        require_id(id, "budget")?;
        budgets::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .map(with_category)
            .ok_or(StoreError::NotFound("Budget"))
    }

    /// Creates a budget for a category and month.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, `InvalidReference` for an
    /// unknown category, and `Duplicate` when the category already has a
    /// budget for that month.
    pub async fn create(&self, input: BudgetInput) -> StoreResult<BudgetWithCategory> {
        let NewBudget {
            category_id,
            amount,
            month,
        } = input.validate_input()?;

        let category = categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::InvalidReference(category_id))?;

        let existing = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.eq(category_id))
            .filter(budgets::Column::Month.eq(month.first_day()))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(duplicate(&category.name, &month.to_string()));
        }

        let now = Utc::now();
        // Concurrent creates for the same pair are settled by the unique index
        let budget = budgets::ActiveModel {
            category_id: Set(category_id),
            amount: Set(amount),
            month: Set(month.first_day()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match classify(&e) {
            Some(Constraint::Unique) => {
                warn!(category_id = %category_id, month = %month, "Concurrent budget insert rejected");
                duplicate(&category.name, &month.to_string())
            }
            _ => reference_error(e, category_id),
        })?;

        info!(
            budget_id = %budget.id,
            category_id = %category_id,
            month = %month,
            amount = %budget.amount,
            "Budget created"
        );
        Ok(BudgetWithCategory {
            budget,
            category_name: category.name,
        })
    }

    /// Changes a budget's amount. Category and month are immutable.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount, or `NotFound`.
    pub async fn update(
        &self,
        id: i32,
        input: BudgetAmountInput,
    ) -> StoreResult<BudgetWithCategory> {
        require_id(id, "budget")?;
        let amount = input.validate_input()?;
        let found = self.get(id).await?;

        let mut active: budgets::ActiveModel = found.budget.into();
        active.amount = Set(amount);
        active.updated_at = Set(Utc::now().into());
        let budget = active.update(&self.db).await?;

        info!(budget_id = %id, amount = %budget.amount, "Budget updated");
        Ok(BudgetWithCategory {
            budget,
            category_name: found.category_name,
        })
    }

    /// Deletes a budget and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no budget has this ID.
    pub async fn delete(&self, id: i32) -> StoreResult<BudgetWithCategory> {
        let found = self.get(id).await?;
        found.budget.clone().delete(&self.db).await?;

        info!(budget_id = %id, "Budget deleted");
        Ok(found)
    }
}

fn with_category(
    (budget, category): (budgets::Model, Option<categories::Model>),
) -> BudgetWithCategory {
    BudgetWithCategory {
        budget,
        category_name: category.map(|c| c.name).unwrap_or_default(),
    }
}

fn duplicate(category: &str, month: &str) -> StoreError {
    StoreError::Duplicate(format!(
        "Budget already exists for {category} in {month}"
    ))
}
