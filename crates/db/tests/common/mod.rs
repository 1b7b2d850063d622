//! Shared setup for repository integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tally_core::validation::{BudgetInput, CategoryInput, ExpenseInput};
use tally_db::{BudgetRepository, CategoryRepository, ExpenseRepository, connect, run_migrations};
use tally_shared::DatabaseConfig;

/// Opens a fresh in-memory database with migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&db).await.expect("Failed to run migrations");
    db
}

/// Creates a category and returns its ID.
pub async fn create_category(db: &DatabaseConnection, name: &str) -> i32 {
    CategoryRepository::new(db.clone())
        .create(CategoryInput::new(name, None))
        .await
        .expect("Failed to create category")
        .id
}

/// Creates an expense on `date` (`YYYY-MM-DD`) and returns its ID.
pub async fn create_expense(
    db: &DatabaseConnection,
    category_id: i32,
    amount: Decimal,
    date: &str,
) -> i32 {
    let input = ExpenseInput {
        date: Some(date.to_string()),
        ..ExpenseInput::new(amount, category_id)
    };
    ExpenseRepository::new(db.clone())
        .create(input)
        .await
        .expect("Failed to create expense")
        .expense
        .id
}

/// Creates a budget and returns its ID.
pub async fn create_budget(
    db: &DatabaseConnection,
    category_id: i32,
    amount: Decimal,
    month: &str,
) -> i32 {
    BudgetRepository::new(db.clone())
        .create(BudgetInput::new(category_id, amount, month))
        .await
        .expect("Failed to create budget")
        .budget
        .id
}
