//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;

pub use budget::{BudgetRepository, BudgetWithCategory};
pub use category::CategoryRepository;
pub use expense::{ExpenseRepository, ExpenseWithCategory};
pub use report::ReportRepository;
