use super::StorageError;
use catalog_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 数据库连接参数
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// DatabaseManager 管理目录服务的数据库连接池
#[derive(Clone)]
pub struct DatabaseManager {
    primary: Arc<DatabaseConnection>,
}

impl DatabaseManager {
    /// 建立连接池
    ///
    /// 对于文件型SQLite地址，会先创建数据库文件所在目录。
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StorageError> {
        if let Some(dir) = sqlite_parent_dir(&settings.url) {
            std::fs::create_dir_all(dir)?;
        }

        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(settings.connect_timeout)
            .acquire_timeout(settings.connect_timeout)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        info!(max_connections = settings.max_connections, "Database connection pool established");

        Ok(Self {
            primary: Arc::new(db),
        })
    }

    /// 执行所有未应用的迁移
    pub async fn migrate(&self) -> Result<(), StorageError> {
        Migrator::up(&*self.primary, None).await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// 检查数据库是否可达
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.primary.ping().await?;
        Ok(())
    }

    /// 获取主数据库连接
    pub fn primary_db(&self) -> Arc<DatabaseConnection> {
        self.primary.clone()
    }
}

/// 解析 `sqlite://path/to/file.db?mode=rwc` 形式地址中的目录部分
fn sqlite_parent_dir(url: &str) -> Option<&Path> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}
