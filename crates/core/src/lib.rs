//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `month` - Calendar month tokens and date ranges
//! - `validation` - Caller input checks for categories, expenses and budgets
//! - `reports` - Monthly budget-vs-spend aggregation

pub mod month;
pub mod reports;
pub mod validation;

pub use month::{Month, MonthParseError};
pub use validation::ValidationError;
