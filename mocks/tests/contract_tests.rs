//! Every record store must satisfy the same repository contract.

use database::{InMemoryToDoRepository, SqliteToDoRepository};
use mocks::{test_repository_contract, MockToDoRepository};
use tempfile::TempDir;

#[tokio::test]
async fn test_contract_with_in_memory_sqlite() {
    let repo = SqliteToDoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();

    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_contract_with_file_sqlite() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("contract.sqlite").display());
    let repo = SqliteToDoRepository::new(&url).await.unwrap();
    repo.migrate().await.unwrap();

    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_contract_with_memory_store() {
    let repo = InMemoryToDoRepository::new();

    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_contract_with_mock() {
    let repo = MockToDoRepository::new();

    test_repository_contract(&repo).await;

    let history = repo.call_history();
    assert!(!history.is_empty(), "Mock should have recorded method calls");
    repo.assert_called("create");
    repo.assert_called("update");
    repo.assert_called("list_by_expiry_range");
}
