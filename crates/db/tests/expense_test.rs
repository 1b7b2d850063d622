//! Integration tests for Expense repository.

mod common;

use chrono::{NaiveDate, Utc};
use common::{create_category, create_expense, setup_db};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tally_core::validation::ExpenseInput;
use tally_db::{ExpenseRepository, StoreError};
use tally_shared::Money;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_expense_create_with_date() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let repo = ExpenseRepository::new(db);

    let created = repo
        .create(
            ExpenseInput::new(dec!(42.5), food)
                .with_description("  Lunch ")
                .with_date(date(2024, 3, 5)),
        )
        .await
        .expect("Failed to create expense");

    assert_eq!(created.category_name, "Food");
    assert_eq!(created.expense.category_id, food);
    assert_eq!(Money::new(created.expense.amount).to_string(), "42.50");
    assert_eq!(created.expense.description.as_deref(), Some("Lunch"));
    assert_eq!(created.expense.date, date(2024, 3, 5));
}

#[tokio::test]
async fn test_expense_create_defaults_to_today() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let repo = ExpenseRepository::new(db);

    let before = Utc::now().date_naive();
    let created = repo
        .create(ExpenseInput::new(dec!(3), food))
        .await
        .unwrap();
    let after = Utc::now().date_naive();

    assert!(created.expense.date >= before && created.expense.date <= after);
}

#[tokio::test]
async fn test_expense_create_accepts_string_amount_and_id() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let repo = ExpenseRepository::new(db);

    let input = ExpenseInput {
        amount: Some(json!("19.999")),
        category_id: Some(json!(food.to_string())),
        description: None,
        date: Some("2024-03-10".to_string()),
    };
    let created = repo.create(input).await.unwrap();

    assert_eq!(Money::new(created.expense.amount).to_string(), "20.00");
}

#[tokio::test]
async fn test_expense_create_unknown_category() {
    let db = setup_db().await;
    let repo = ExpenseRepository::new(db);

    let result = repo.create(ExpenseInput::new(dec!(10), 99)).await;
    assert!(matches!(result, Err(StoreError::InvalidReference(99))));
    assert!(repo.list().await.unwrap().is_empty());
}

#[rstest]
#[case(json!(0))]
#[case(json!(-5))]
#[case(json!("abc"))]
#[case(json!(null))]
#[case(json!(0.001))]
#[tokio::test]
async fn test_expense_create_rejects_bad_amount(#[case] amount: serde_json::Value) {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let repo = ExpenseRepository::new(db);

    let input = ExpenseInput {
        amount: Some(amount),
        category_id: Some(json!(food)),
        description: None,
        date: None,
    };
    assert!(matches!(
        repo.create(input).await,
        Err(StoreError::Validation(_))
    ));
    assert!(repo.list().await.unwrap().is_empty());
}

#[rstest]
#[case(json!(0))]
#[case(json!(-1))]
#[case(json!("food"))]
#[case(json!(1.5))]
#[tokio::test]
async fn test_expense_create_rejects_bad_category_id(#[case] category_id: serde_json::Value) {
    let db = setup_db().await;
    let repo = ExpenseRepository::new(db);

    let input = ExpenseInput {
        amount: Some(json!(10)),
        category_id: Some(category_id),
        description: None,
        date: None,
    };
    assert!(matches!(
        repo.create(input).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn test_expense_list_newest_first() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let rent = create_category(&db, "Rent").await;
    let first = create_expense(&db, food, dec!(10), "2024-03-01").await;
    let latest = create_expense(&db, rent, dec!(900), "2024-03-28").await;
    let same_day = create_expense(&db, food, dec!(5), "2024-03-01").await;

    let listed = ExpenseRepository::new(db).list().await.unwrap();
    let ids: Vec<i32> = listed.iter().map(|e| e.expense.id).collect();

    assert_eq!(ids, [latest, same_day, first]);
    assert_eq!(listed[0].category_name, "Rent");
    assert_eq!(listed[1].category_name, "Food");
}

#[tokio::test]
async fn test_expense_update_replaces_fields() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let travel = create_category(&db, "Travel").await;
    let id = create_expense(&db, food, dec!(10), "2024-03-01").await;
    let repo = ExpenseRepository::new(db);

    let updated = repo
        .update(
            id,
            ExpenseInput::new(dec!(75.25), travel)
                .with_description("Train")
                .with_date(date(2024, 3, 9)),
        )
        .await
        .expect("Failed to update expense");

    assert_eq!(updated.expense.id, id);
    assert_eq!(updated.expense.amount, dec!(75.25));
    assert_eq!(updated.expense.category_id, travel);
    assert_eq!(updated.category_name, "Travel");
    assert_eq!(updated.expense.description.as_deref(), Some("Train"));
    assert_eq!(updated.expense.date, date(2024, 3, 9));
}

#[tokio::test]
async fn test_expense_update_without_date_keeps_date() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let id = create_expense(&db, food, dec!(10), "2023-12-24").await;
    let repo = ExpenseRepository::new(db);

    let updated = repo
        .update(id, ExpenseInput::new(dec!(11), food))
        .await
        .unwrap();

    assert_eq!(updated.expense.date, date(2023, 12, 24));
    assert_eq!(updated.expense.description, None);
}

#[tokio::test]
async fn test_expense_update_errors() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let id = create_expense(&db, food, dec!(10), "2024-03-01").await;
    let repo = ExpenseRepository::new(db);

    let missing = repo.update(id + 1, ExpenseInput::new(dec!(1), food)).await;
    assert!(matches!(missing, Err(StoreError::NotFound("Expense"))));

    let unknown = repo.update(id, ExpenseInput::new(dec!(1), 77)).await;
    assert!(matches!(unknown, Err(StoreError::InvalidReference(77))));

    let invalid = repo
        .update(id, ExpenseInput::new(Decimal::ZERO, food))
        .await;
    assert!(matches!(invalid, Err(StoreError::Validation(_))));

    let unchanged = repo.get(id).await.unwrap();
    assert_eq!(unchanged.expense.amount, dec!(10));
}

#[tokio::test]
async fn test_expense_delete() {
    let db = setup_db().await;
    let food = create_category(&db, "Food").await;
    let id = create_expense(&db, food, dec!(10), "2024-03-01").await;
    let repo = ExpenseRepository::new(db);

    let deleted = repo.delete(id).await.expect("Failed to delete expense");
    assert_eq!(deleted.expense.id, id);
    assert_eq!(deleted.category_name, "Food");

    assert!(repo.list().await.unwrap().is_empty());
    assert!(matches!(repo.delete(id).await, Err(StoreError::NotFound(_))));
}
