//! Integration tests for PgEmployeeRepository
//!
//! Each test starts its own PostgreSQL container and applies the migrations.
//! Run with: cargo test -p domain_employees --test integration_test -- --ignored

use domain_employees::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_employee(builder: &TestDataBuilder, suffix: &str) -> NewEmployee {
    NewEmployee::new(
        builder.name("employee", suffix),
        "Integration",
        builder.email(suffix),
    )
}

// ============================================================================
// Create / Read
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_find_by_id");

    let created = repo.create(new_employee(&builder, "a")).await.unwrap();
    assert!(created.id > 0);

    let found = assert_some(repo.find_by_id(created.id).await.unwrap(), "created employee");
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_id_missing_returns_none() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());

    assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_email() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("find_by_email");

    let created = repo.create(new_employee(&builder, "a")).await.unwrap();

    let found = repo.find_by_email(&created.email).await.unwrap();
    assert_eq!(found, Some(created));
    assert_eq!(repo.find_by_email("nobody@example.com").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_is_ordered_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("find_all_ordered");

    for suffix in ["a", "b", "c"] {
        repo.create(new_employee(&builder, suffix)).await.unwrap();
    }

    let employees = repo.find_all().await.unwrap();
    assert_eq!(employees.len(), 3);

    let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    assert_ascending_ids(&ids, "find_all");
}

// ============================================================================
// Unique email
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_maps_to_duplicate_email() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_index");

    let first = new_employee(&builder, "a");
    let email = first.email.clone();
    repo.create(first).await.unwrap();

    let err = repo
        .create(NewEmployee::new("Other", "Person", email.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, EmployeeError::DuplicateEmail(e) if e == email));

    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_to_taken_email_is_duplicate() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_taken_email");

    let first = repo.create(new_employee(&builder, "a")).await.unwrap();
    let mut second = repo.create(new_employee(&builder, "b")).await.unwrap();

    second.email = first.email.clone();
    let err = repo.update(second).await.unwrap_err();
    assert!(matches!(err, EmployeeError::DuplicateEmail(_)));
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_replaces_fields() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_replaces");

    let created = repo.create(new_employee(&builder, "a")).await.unwrap();
    let replacement = Employee {
        id: created.id,
        name: "Eduardo".to_string(),
        lastname: "Jove".to_string(),
        email: builder.email("b"),
    };

    let updated = repo.update(replacement.clone()).await.unwrap();
    assert_eq!(updated, replacement);
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(replacement));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_returns_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());

    let ghost = Employee {
        id: 4242,
        name: "Ghost".to_string(),
        lastname: "Employee".to_string(),
        email: "ghost@example.com".to_string(),
    };

    let err = repo.update(ghost).await.unwrap_err();
    assert!(matches!(err, EmployeeError::NotFound(4242)));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_by_id");

    let created = repo.create(new_employee(&builder, "a")).await.unwrap();

    assert!(repo.delete_by_id(created.id).await.unwrap());
    assert!(!repo.delete_by_id(created.id).await.unwrap());
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_truncate_restarts_identity() {
    let db = TestDatabase::new().await;
    let repo = PgEmployeeRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("truncate_restarts");

    repo.create(new_employee(&builder, "a")).await.unwrap();
    db.truncate("employees").await;

    let created = repo.create(new_employee(&builder, "b")).await.unwrap();
    assert_eq!(created.id, 1);
}
