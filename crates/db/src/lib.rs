//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for categories, expenses, budgets and reports
//! - Database migrations
//! - Constraint-violation classification

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::{Constraint, StoreError, StoreResult, classify};
pub use migration::Migrator;
pub use repositories::{
    BudgetRepository, BudgetWithCategory, CategoryRepository, ExpenseRepository,
    ExpenseWithCategory, ReportRepository,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tally_shared::DatabaseConfig;
use tracing::info;

/// Establishes a pooled connection to the database.
///
/// An in-memory `SQLite` database exists per connection, so its pool is
/// pinned to a single connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let in_memory = config.url.starts_with("sqlite::memory:");
    let (max, min) = if in_memory {
        (1, 1)
    } else {
        (config.max_connections, config.min_connections)
    };
    let timeout = Duration::from_secs(config.connect_timeout_secs);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(max)
        .min_connections(min)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(max_connections = max, "Database connected");
    Ok(db)
}

/// Applies all pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Migrations applied");
    Ok(())
}
