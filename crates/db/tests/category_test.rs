//! Integration tests for Category repository.

mod common;

use common::{create_budget, create_category, create_expense, setup_db};
use rust_decimal_macros::dec;
use tally_core::validation::CategoryInput;
use tally_db::{CategoryRepository, StoreError};

#[tokio::test]
async fn test_category_create_trims_fields() {
    let db = setup_db().await;
    let repo = CategoryRepository::new(db);

    let category = repo
        .create(CategoryInput::new("  Food  ", Some("  Groceries and dining ")))
        .await
        .expect("Failed to create category");

    assert!(category.id > 0);
    assert_eq!(category.name, "Food");
    assert_eq!(category.description.as_deref(), Some("Groceries and dining"));
    assert_eq!(category.created_at, category.updated_at);
}

#[tokio::test]
async fn test_category_create_blank_description_is_null() {
    let db = setup_db().await;
    let repo = CategoryRepository::new(db);

    let category = repo
        .create(CategoryInput::new("Rent", Some("   ")))
        .await
        .unwrap();

    assert_eq!(category.description, None);
}

#[tokio::test]
async fn test_category_create_rejects_invalid_name() {
    let db = setup_db().await;
    let repo = CategoryRepository::new(db);

    let short = repo.create(CategoryInput::new("A", None)).await;
    assert!(matches!(short, Err(StoreError::Validation(_))));

    let missing = repo.create(CategoryInput::default()).await;
    assert!(matches!(missing, Err(StoreError::Validation(_))));

    let long = repo.create(CategoryInput::new("x".repeat(101), None)).await;
    assert!(matches!(long, Err(StoreError::Validation(_))));

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_list_ordered_by_name() {
    let db = setup_db().await;
    create_category(&db, "Utilities").await;
    create_category(&db, "Books").await;
    create_category(&db, "Food").await;

    let names: Vec<String> = CategoryRepository::new(db)
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, ["Books", "Food", "Utilities"]);
}

#[tokio::test]
async fn test_category_get() {
    let db = setup_db().await;
    let id = create_category(&db, "Travel").await;
    let repo = CategoryRepository::new(db);

    assert_eq!(repo.get(id).await.unwrap().name, "Travel");
    assert!(matches!(
        repo.get(id + 100).await,
        Err(StoreError::NotFound("Category"))
    ));
    assert!(matches!(repo.get(0).await, Err(StoreError::Validation(_))));
}

#[tokio::test]
async fn test_category_update() {
    let db = setup_db().await;
    let id = create_category(&db, "Food").await;
    let repo = CategoryRepository::new(db);
    let before = repo.get(id).await.unwrap();

    let updated = repo
        .update(id, CategoryInput::new("Dining", Some("Restaurants")))
        .await
        .expect("Failed to update category");

    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Dining");
    assert_eq!(updated.description.as_deref(), Some("Restaurants"));
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_category_update_missing() {
    let db = setup_db().await;
    let repo = CategoryRepository::new(db);

    let result = repo.update(42, CategoryInput::new("Dining", None)).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_category_delete_returns_row() {
    let db = setup_db().await;
    let id = create_category(&db, "Temporary").await;
    let repo = CategoryRepository::new(db);

    let deleted = repo.delete(id).await.expect("Failed to delete category");
    assert_eq!(deleted.id, id);
    assert_eq!(deleted.name, "Temporary");

    assert!(matches!(repo.get(id).await, Err(StoreError::NotFound(_))));
    assert!(matches!(repo.delete(id).await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_category_delete_blocked_by_expense() {
    let db = setup_db().await;
    let id = create_category(&db, "Food").await;
    create_expense(&db, id, dec!(12.50), "2024-03-05").await;
    let repo = CategoryRepository::new(db);

    let result = repo.delete(id).await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));
    assert_eq!(repo.get(id).await.unwrap().name, "Food");
}

#[tokio::test]
async fn test_category_delete_blocked_by_budget() {
    let db = setup_db().await;
    let id = create_category(&db, "Food").await;
    create_budget(&db, id, dec!(200), "2024-03").await;
    let repo = CategoryRepository::new(db);

    let result = repo.delete(id).await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));
    assert_eq!(repo.get(id).await.unwrap().name, "Food");
}

#[tokio::test]
async fn test_category_get_matches_create() {
    let db = setup_db().await;
    let repo = CategoryRepository::new(db);

    let created = repo
        .create(CategoryInput::new("Health", Some("Pharmacy and gym")))
        .await
        .unwrap();
    let fetched = repo.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
}
