//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::Money;

use crate::month::Month;

/// A category as seen by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCategory {
    /// Category ID.
    pub id: i32,
    /// Category name.
    pub name: String,
}

/// A budget row as seen by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAmount {
    /// Budgeted category.
    pub category_id: i32,
    /// Stored budget month (first of month).
    pub month: NaiveDate,
    /// Budgeted amount.
    pub amount: Decimal,
}

/// An expense row as seen by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseAmount {
    /// Expense category.
    pub category_id: i32,
    /// Expense date.
    pub date: NaiveDate,
    /// Amount spent.
    pub amount: Decimal,
}

/// Budget versus spend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    /// Category ID.
    pub id: i32,
    /// Category name.
    pub name: String,
    /// Budget for the month, zero when none is set.
    pub budget: Money,
    /// Total spent in the month.
    pub spent: Money,
}

/// Monthly budget-vs-spend report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// Report month.
    pub month: Month,
    /// Sum of all expenses dated within the month.
    pub total_expenses: Money,
    /// Sum of all budgets for the month.
    pub total_budget: Money,
    /// Every category, ordered by name.
    pub categories: Vec<CategorySpend>,
}
