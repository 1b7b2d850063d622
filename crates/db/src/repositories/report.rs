//! Report repository for loading monthly report data.
//!
//! Runs three independent reads for the month and hands the rows to
//! `ReportService` for aggregation.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tally_core::Month;
use tally_core::reports::{
    BudgetAmount, ExpenseAmount, MonthlyReport, ReportCategory, ReportService,
};
use tracing::debug;

use crate::entities::{budgets, categories, expenses};
use crate::error::StoreResult;

/// Report repository for monthly summaries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the report for a raw `YYYY-MM` month parameter.
    ///
    /// # Errors
    ///
    /// Returns a report error if the month is missing or malformed, or an
    /// error if any query fails.
    pub async fn monthly_report_for(&self, raw_month: Option<&str>) -> StoreResult<MonthlyReport> {
        let month = ReportService::parse_month(raw_month)?;
        self.monthly_report(month).await
    }

    /// Builds the budget-vs-spend report for `month`.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn monthly_report(&self, month: Month) -> StoreResult<MonthlyReport> {
        let categories = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| ReportCategory {
                id: c.id,
                name: c.name,
            })
            .collect::<Vec<_>>();

        let budgets = budgets::Entity::find()
            .filter(budgets::Column::Month.eq(month.first_day()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| BudgetAmount {
                category_id: b.category_id,
                month: b.month,
                amount: b.amount,
            })
            .collect::<Vec<_>>();

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::Date.between(month.first_day(), month.last_day()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| ExpenseAmount {
                category_id: e.category_id,
                date: e.date,
                amount: e.amount,
            })
            .collect::<Vec<_>>();

        debug!(
            month = %month,
            categories = categories.len(),
            budgets = budgets.len(),
            expenses = expenses.len(),
            "Loaded report rows"
        );

        Ok(ReportService::monthly_report(
            month, categories, &budgets, &expenses,
        ))
    }
}
