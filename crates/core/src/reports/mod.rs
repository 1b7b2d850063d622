//! Monthly report generation.
//!
//! Pure aggregation of categories, budgets and expenses into a
//! budget-vs-spend summary for one calendar month. Loading the rows is
//! the database layer's job; everything here works on plain values.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
