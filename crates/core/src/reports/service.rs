//! Report generation service.

use std::collections::HashMap;

use tally_shared::types::Money;

use super::error::ReportError;
use super::types::{BudgetAmount, CategorySpend, ExpenseAmount, MonthlyReport, ReportCategory};
use crate::month::Month;

/// Service for generating monthly reports.
pub struct ReportService;

impl ReportService {
    /// Reads the `month` query value.
    ///
    /// # Errors
    ///
    /// Returns `MissingMonth` when absent or blank, `InvalidMonth` when it is
    /// not a `YYYY-MM` token.
    pub fn parse_month(raw: Option<&str>) -> Result<Month, ReportError> {
        match raw.map(str::trim) {
            None | Some("") => Err(ReportError::MissingMonth),
            Some(token) => Ok(token.parse()?),
        }
    }

    /// Builds the report for `month`.
    ///
    /// Expenses outside the month and budgets for other months are ignored.
    /// Every category appears in the breakdown, with zero budget and spend
    /// when it has no rows for the month. The breakdown keeps the order of
    /// `categories`, which callers load by name then id.
    #[must_use]
    pub fn monthly_report(
        month: Month,
        categories: Vec<ReportCategory>,
        budgets: &[BudgetAmount],
        expenses: &[ExpenseAmount],
    ) -> MonthlyReport {
        let mut budget_by_category: HashMap<i32, Money> = HashMap::new();
        let mut total_budget = Money::ZERO;
        for budget in budgets.iter().filter(|b| b.month == month.first_day()) {
            let amount = Money::new(budget.amount);
            *budget_by_category.entry(budget.category_id).or_default() += amount;
            total_budget += amount;
        }

        let mut spent_by_category: HashMap<i32, Money> = HashMap::new();
        let mut total_expenses = Money::ZERO;
        for expense in expenses.iter().filter(|e| month.contains(e.date)) {
            let amount = Money::new(expense.amount);
            *spent_by_category.entry(expense.category_id).or_default() += amount;
            total_expenses += amount;
        }

        let breakdown: Vec<CategorySpend> = categories
            .into_iter()
            .map(|category| CategorySpend {
                budget: budget_by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or_default(),
                spent: spent_by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or_default(),
                id: category.id,
                name: category.name,
            })
            .collect();

        MonthlyReport {
            month,
            total_expenses,
            total_budget,
            categories: breakdown,
        }
    }
}
