//! Expense repository for expense database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder, Set};
use tally_core::validation::{ExpenseInput, NewExpense, require_id};
use tracing::info;

use crate::entities::{categories, expenses};
use crate::error::{Constraint, StoreError, StoreResult, classify};

/// Expense joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseWithCategory {
    /// Expense record.
    pub expense: expenses::Model,
    /// Name of the referenced category.
    pub category_name: String,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all expenses, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> StoreResult<Vec<ExpenseWithCategory>> {
        let rows = expenses::Entity::find()
            .find_also_related(categories::Entity)
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(with_category).collect())
    }

    /// Finds an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no expense has this ID.
    pub async fn get(&self, id: i32) -> StoreResult<ExpenseWithCategory> {
        require_id(id, "expense")?;
        expenses::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .map(with_category)
            .ok_or(StoreError::NotFound("Expense"))
    }

    /// Records an expense. The date defaults to today (UTC).
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount, category id or date, and
    /// `InvalidReference` when the category does not exist.
    pub async fn create(&self, input: ExpenseInput) -> StoreResult<ExpenseWithCategory> {
        let NewExpense {
            amount,
            category_id,
            description,
            date,
        } = input.validate_input()?;
        let category = self.category(category_id).await?;
        let now = Utc::now();

        let expense = expenses::ActiveModel {
            amount: Set(amount),
            category_id: Set(category_id),
            description: Set(description),
            date: Set(date.unwrap_or_else(|| now.date_naive())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| reference_error(e, category_id))?;

        info!(
            expense_id = %expense.id,
            category_id = %category_id,
            amount = %expense.amount,
            "Expense created"
        );
        Ok(ExpenseWithCategory {
            expense,
            category_name: category.name,
        })
    }

    /// Replaces an expense's fields. An omitted date keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns a validation error as for `create`, `NotFound`, or
    /// `InvalidReference` when the new category does not exist.
    pub async fn update(&self, id: i32, input: ExpenseInput) -> StoreResult<ExpenseWithCategory> {
        require_id(id, "expense")?;
        let NewExpense {
            amount,
            category_id,
            description,
            date,
        } = input.validate_input()?;

        let existing = expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound("Expense"))?;
        let category = self.category(category_id).await?;

        let mut active: expenses::ActiveModel = existing.into();
        active.amount = Set(amount);
        active.category_id = Set(category_id);
        active.description = Set(description);
        if let Some(date) = date {
            active.date = Set(date);
        }
        active.updated_at = Set(Utc::now().into());

        let expense = active
            .update(&self.db)
            .await
            .map_err(|e| reference_error(e, category_id))?;

        info!(expense_id = %id, "Expense updated");
        Ok(ExpenseWithCategory {
            expense,
            category_name: category.name,
        })
    }

    /// Deletes an expense and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no expense has this ID.
    pub async fn delete(&self, id: i32) -> StoreResult<ExpenseWithCategory> {
        let found = self.get(id).await?;
        found.expense.clone().delete(&self.db).await?;

        info!(expense_id = %id, "Expense deleted");
        Ok(found)
    }

    async fn category(&self, id: i32) -> StoreResult<categories::Model> {
        categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::InvalidReference(id))
    }
}

fn with_category(
    (expense, category): (expenses::Model, Option<categories::Model>),
) -> ExpenseWithCategory {
    ExpenseWithCategory {
        expense,
        category_name: category.map(|c| c.name).unwrap_or_default(),
    }
}

/// Maps a foreign key failure on write to an unknown category.
pub(crate) fn reference_error(err: DbErr, category_id: i32) -> StoreError {
    if classify(&err) == Some(Constraint::ForeignKey) {
        StoreError::InvalidReference(category_id)
    } else {
        err.into()
    }
}
