//! 存储层集成测试
//!
//! 使用内存SQLite和迁移器验证Repository的端到端行为。

use super::*;
use catalog_domain::{LanguageFilter, NewExtension};
use sea_orm::{ConnectionTrait, Statement};
use std::collections::HashSet;
use std::time::Duration;

/// 创建测试用的Repository（单连接内存数据库）
async fn create_test_repository() -> SeaOrmExtensionRepository {
    let mut settings = DatabaseSettings::new("sqlite::memory:");
    settings.max_connections = 1;

    let manager = DatabaseManager::connect(&settings).await.unwrap();
    manager.migrate().await.unwrap();
    SeaOrmExtensionRepository::new(manager.primary_db(), Duration::from_secs(5))
}

fn new_extension(name: &str, language: &str) -> NewExtension {
    NewExtension {
        name: name.to_string(),
        hyperlink: format!("https://example.com/{}", name),
        about: format!("{} extension", name),
        image: format!("https://example.com/{}.png", name),
        language: language.to_string(),
    }
}

#[tokio::test]
async fn test_insert_assigns_unique_ids() {
    let repo = create_test_repository().await;

    let mut ids = HashSet::new();
    for i in 0..5 {
        let record = repo
            .insert(new_extension(&format!("ext-{}", i), "RUST"))
            .await
            .unwrap();
        assert!(ids.insert(record.id), "duplicate id {}", record.id);
    }

    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let repo = create_test_repository().await;

    let record = repo.insert(new_extension("rust-analyzer", "RUST")).await.unwrap();
    assert_eq!(record.name, "rust-analyzer");
    assert_eq!(record.hyperlink, "https://example.com/rust-analyzer");
    assert_eq!(record.about, "rust-analyzer extension");
    assert_eq!(record.image, "https://example.com/rust-analyzer.png");
    assert_eq!(record.language, "RUST");

    let listed = repo.list(&LanguageFilter::Any).await.unwrap();
    assert_eq!(listed, vec![record]);
}

#[tokio::test]
async fn test_list_filters_by_language() {
    let repo = create_test_repository().await;
    repo.insert(new_extension("gopls", "GO")).await.unwrap();
    repo.insert(new_extension("rust-analyzer", "RUST")).await.unwrap();
    repo.insert(new_extension("clippy", "RUST")).await.unwrap();

    let rust = repo
        .list(&LanguageFilter::Language("RUST".to_string()))
        .await
        .unwrap();
    let names: Vec<&str> = rust.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["rust-analyzer", "clippy"]);

    let all = repo.list(&LanguageFilter::Any).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_list_no_match_is_empty() {
    let repo = create_test_repository().await;
    repo.insert(new_extension("gopls", "GO")).await.unwrap();

    let records = repo
        .list(&LanguageFilter::Language("ZZ".to_string()))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_filter_is_bound_as_parameter() {
    let repo = create_test_repository().await;
    repo.insert(new_extension("gopls", "GO")).await.unwrap();

    let records = repo
        .list(&LanguageFilter::Language("GO' OR '1'='1".to_string()))
        .await
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_table_surfaces_storage_error() {
    let mut settings = DatabaseSettings::new("sqlite::memory:");
    settings.max_connections = 1;
    let manager = DatabaseManager::connect(&settings).await.unwrap();
    manager.migrate().await.unwrap();

    let db = manager.primary_db();
    let repo = SeaOrmExtensionRepository::new(db.clone(), Duration::from_secs(1));

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "DROP TABLE extension".to_string()))
        .await
        .unwrap();

    let err = repo.list(&LanguageFilter::Any).await.unwrap_err();
    assert!(matches!(err, StorageError::Database(_)));
    let err = repo.insert(new_extension("gopls", "GO")).await.unwrap_err();
    assert!(matches!(err, StorageError::Database(_)));
}

/// 超时中断的插入不会留下记录：要么返回存储行，要么存储保持不变
#[tokio::test]
async fn test_timed_out_insert_leaves_store_unchanged() {
    // 使用文件数据库，连接被丢弃后表结构仍然存在
    let path = std::env::temp_dir().join(format!(
        "catalog-insert-timeout-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let settings = DatabaseSettings::new(format!("sqlite://{}?mode=rwc", path.display()));
    let manager = DatabaseManager::connect(&settings).await.unwrap();
    manager.migrate().await.unwrap();

    let hasty = SeaOrmExtensionRepository::new(manager.primary_db(), Duration::ZERO);
    let patient = SeaOrmExtensionRepository::new(manager.primary_db(), Duration::from_secs(5));

    for i in 0..5 {
        let before = patient.count().await.unwrap();
        let result = hasty.insert(new_extension(&format!("ext-{}", i), "GO")).await;
        let after = patient.count().await.unwrap();
        match result {
            Ok(_) => assert_eq!(after, before + 1),
            Err(StorageError::Timeout { .. }) => assert_eq!(after, before),
            Err(e) => panic!("unexpected storage error: {}", e),
        }
    }

    drop(manager);
    let _ = std::fs::remove_file(&path);
}
