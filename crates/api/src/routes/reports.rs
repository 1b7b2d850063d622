//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use tally_core::reports::MonthlyReport;
use tally_db::ReportRepository;

use crate::{AppState, error::ApiResult};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports", get(get_monthly_report))
}

/// Query parameters for the monthly report.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Month as `YYYY-MM`.
    pub month: Option<String>,
}

/// GET /reports?month=YYYY-MM
async fn get_monthly_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<MonthlyReport>> {
    let Query(query) = query?;
    let repo = ReportRepository::new((*state.db).clone());
    let report = repo.monthly_report_for(query.month.as_deref()).await?;
    Ok(Json(report))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
