use crate::database::extension::{self, Entity as ExtensionEntity};
use crate::database::StorageError;
use async_trait::async_trait;
use catalog_domain::{ExtensionRecord, LanguageFilter, NewExtension};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// ExtensionRepository trait 定义扩展记录的数据访问操作
#[async_trait]
pub trait ExtensionRepository: Send + Sync {
    /// 按语言过滤列出记录，按id升序；无匹配时返回空列表
    async fn list(&self, filter: &LanguageFilter) -> Result<Vec<ExtensionRecord>, StorageError>;

    /// 插入记录并返回带有新分配id的存储行
    async fn insert(&self, input: NewExtension) -> Result<ExtensionRecord, StorageError>;

    async fn count(&self) -> Result<u64, StorageError>;
}

/// SeaOrmExtensionRepository 使用Sea-ORM实现的Repository
pub struct SeaOrmExtensionRepository {
    db: Arc<DatabaseConnection>,
    timeout: Duration,
}

impl SeaOrmExtensionRepository {
    pub fn new(db: Arc<DatabaseConnection>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// 为单次存储操作加上超时上限
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => Err(StorageError::Timeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl ExtensionRepository for SeaOrmExtensionRepository {
    async fn list(&self, filter: &LanguageFilter) -> Result<Vec<ExtensionRecord>, StorageError> {
        let mut query = ExtensionEntity::find().order_by_asc(extension::Column::Id);

        // 过滤值作为参数绑定，不拼接进SQL文本
        if let LanguageFilter::Language(language) = filter {
            query = query.filter(extension::Column::Language.like(language.as_str()));
        }

        let rows = self.bounded("list", query.all(&*self.db)).await?;
        Ok(rows.into_iter().map(ExtensionRecord::from).collect())
    }

    async fn insert(&self, input: NewExtension) -> Result<ExtensionRecord, StorageError> {
        let active_model = extension::ActiveModel {
            name: Set(input.name),
            hyperlink: Set(input.hyperlink),
            about: Set(input.about),
            image: Set(input.image),
            language: Set(input.language),
            ..Default::default()
        };

        // 超时时事务被丢弃并回滚；提交不受超时限制，返回错误即表示未写入
        let txn = self.bounded("begin", self.db.begin()).await?;
        let model = self.bounded("insert", active_model.insert(&txn)).await?;
        txn.commit().await?;

        Ok(model.into())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        self.bounded("count", ExtensionEntity::find().count(&*self.db))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseManager, DatabaseSettings};

    #[tokio::test]
    async fn test_bounded_times_out() {
        let mut settings = DatabaseSettings::new("sqlite::memory:");
        settings.max_connections = 1;
        let manager = DatabaseManager::connect(&settings).await.unwrap();
        let repo = SeaOrmExtensionRepository::new(manager.primary_db(), Duration::from_millis(10));

        let err = repo
            .bounded("stall", std::future::pending::<Result<(), DbErr>>())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Timeout { operation: "stall", .. }
        ));
    }
}
