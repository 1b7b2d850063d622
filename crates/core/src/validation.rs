//! Caller input validation for categories, expenses and budgets.
//!
//! Inputs arrive as loosely typed values (amounts as JSON numbers or
//! numeric strings, ids as integers or integer strings). Each `*Input`
//! type validates itself into a normalized `New*` value that the
//! repositories persist unchanged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tally_shared::types::{Money, max_amount};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::month::Month;

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut failures: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    (field.to_string(), message)
                })
            })
            .collect();
        failures.sort();

        let field = failures
            .first()
            .map(|(field, _)| field.clone())
            .unwrap_or_default();
        let message = failures
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ");

        Self { field, message }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Category fields as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryInput {
    /// Display name, 2 to 100 characters.
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters")
    )]
    pub name: Option<String>,
    /// Optional description, at most 500 characters.
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

/// A validated category ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Trimmed name.
    pub name: String,
    /// Trimmed description, `None` when blank.
    pub description: Option<String>,
}

impl CategoryInput {
    /// Creates an input from a name and optional description.
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            description: description.map(str::to_string),
        }
    }

    /// Trims and validates the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is missing or out of bounds, or the
    /// description is too long.
    pub fn validate_input(self) -> Result<NewCategory, ValidationError> {
        let normalized = Self {
            name: trimmed(self.name),
            description: trimmed(self.description),
        };
        normalized.validate()?;

        let name = normalized
            .name
            .ok_or_else(|| ValidationError::new("name", "Name is required"))?;

        Ok(NewCategory {
            name,
            description: normalized.description,
        })
    }
}

// ============================================================================
// Expenses
// ============================================================================

/// Expense fields as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    /// Amount as a JSON number or numeric string.
    pub amount: Option<Value>,
    /// Category id as a JSON integer or integer string.
    pub category_id: Option<Value>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional `YYYY-MM-DD` date; today when omitted on create.
    pub date: Option<String>,
}

/// A validated expense ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Positive amount at two decimal places.
    pub amount: Decimal,
    /// Referenced category.
    pub category_id: i32,
    /// Trimmed description, `None` when blank.
    pub description: Option<String>,
    /// Explicit expense date.
    pub date: Option<NaiveDate>,
}

impl ExpenseInput {
    /// Creates an input from typed values.
    #[must_use]
    pub fn new(amount: Decimal, category_id: i32) -> Self {
        Self {
            amount: Some(Value::String(amount.to_string())),
            category_id: Some(Value::from(category_id)),
            description: None,
            date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the expense date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a positive number, the category
    /// id is not a positive integer, or the date is malformed.
    pub fn validate_input(self) -> Result<NewExpense, ValidationError> {
        let amount = parse_amount(self.amount.as_ref())?;
        let category_id = parse_category_id(self.category_id.as_ref())?;
        let date = self.date.as_deref().map(parse_date).transpose()?;

        Ok(NewExpense {
            amount: amount.amount(),
            category_id,
            description: trimmed(self.description),
            date,
        })
    }
}

// ============================================================================
// Budgets
// ============================================================================

/// Budget fields as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetInput {
    /// Category id as a JSON integer or integer string.
    pub category_id: Option<Value>,
    /// Amount as a JSON number or numeric string.
    pub amount: Option<Value>,
    /// `YYYY-MM`, or any date within the month.
    pub month: Option<String>,
}

/// A validated budget ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Referenced category.
    pub category_id: i32,
    /// Positive amount at two decimal places.
    pub amount: Decimal,
    /// Budget month.
    pub month: Month,
}

impl BudgetInput {
    /// Creates an input from typed values.
    #[must_use]
    pub fn new(category_id: i32, amount: Decimal, month: &str) -> Self {
        Self {
            category_id: Some(Value::from(category_id)),
            amount: Some(Value::String(amount.to_string())),
            month: Some(month.to_string()),
        }
    }

    /// Validates the input, normalizing the month to its first day.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is missing or malformed.
    pub fn validate_input(self) -> Result<NewBudget, ValidationError> {
        let amount = parse_amount(self.amount.as_ref())?;
        let category_id = parse_category_id(self.category_id.as_ref())?;
        let month = self
            .month
            .as_deref()
            .map(Month::parse_lenient)
            .transpose()
            .map_err(|e| ValidationError::new("month", format!("Valid month is required: {e}")))?
            .ok_or_else(|| ValidationError::new("month", "Valid month is required"))?;

        Ok(NewBudget {
            category_id,
            amount: amount.amount(),
            month,
        })
    }
}

/// Budget amount change as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetAmountInput {
    /// Amount as a JSON number or numeric string.
    pub amount: Option<Value>,
}

impl BudgetAmountInput {
    /// Creates an input from a typed amount.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: Some(Value::String(amount.to_string())),
        }
    }

    /// Validates the amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a positive number.
    pub fn validate_input(self) -> Result<Decimal, ValidationError> {
        parse_amount(self.amount.as_ref()).map(Money::amount)
    }
}

// ============================================================================
// Field parsers
// ============================================================================

/// Parses a positive monetary amount, rounded to two decimal places.
///
/// # Errors
///
/// Returns an error for missing, non-numeric, non-positive or oversized values.
pub fn parse_amount(raw: Option<&Value>) -> Result<Money, ValidationError> {
    let invalid = || ValidationError::new("amount", "Valid amount is required");

    let text = match raw {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Err(invalid()),
    };

    let decimal = text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())?;

    let amount = Money::new(decimal);
    if !amount.is_positive() {
        return Err(ValidationError::new(
            "amount",
            "Amount must be greater than zero",
        ));
    }
    if amount.amount() > max_amount() {
        return Err(ValidationError::new(
            "amount",
            format!("Amount cannot exceed {}", Money::new(max_amount())),
        ));
    }

    Ok(amount)
}

/// Parses a positive category id.
///
/// # Errors
///
/// Returns an error for missing, non-integer or non-positive values.
pub fn parse_category_id(raw: Option<&Value>) -> Result<i32, ValidationError> {
    let id = match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    id.and_then(|id| i32::try_from(id).ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::new("category_id", "Valid category is required"))
}

/// Checks a path id.
///
/// # Errors
///
/// Returns an error unless `id` is a positive integer.
pub fn require_id(id: i32, entity: &str) -> Result<i32, ValidationError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ValidationError::new("id", format!("Invalid {entity} ID")))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::new("date", "Date must be formatted as YYYY-MM-DD"))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
