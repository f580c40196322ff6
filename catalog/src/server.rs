use crate::config::Config;
use crate::error::Result;
use catalog_infra::{
    database::{DatabaseManager, ExtensionRepository, SeaOrmExtensionRepository},
    security::{MemoryRateLimiter, RateLimiter},
};
use catalog_service::{CatalogService, DefaultCatalogService};
use catalog_web::AppState;
use std::sync::Arc;
use tracing::{info, warn};

/// 初始化应用状态
pub fn init_app_state(config: &Config, db_manager: &DatabaseManager) -> Result<AppState> {
    let repository: Arc<dyn ExtensionRepository> = Arc::new(SeaOrmExtensionRepository::new(
        db_manager.primary_db(),
        config.database.operation_timeout(),
    ));

    let catalog_service: Arc<dyn CatalogService> =
        Arc::new(DefaultCatalogService::new(repository));

    // 速率限制器状态仅保存在进程内存中
    let rate_limit_policy = config.rate_limit.policy()?;
    if !rate_limit_policy.enabled {
        warn!("Rate limiting is disabled");
    }
    let rate_limiter: Arc<dyn RateLimiter> =
        Arc::new(MemoryRateLimiter::new(config.rate_limit.max_entries));

    info!(
        default_limits = ?config.rate_limit.default_limits,
        route_limits = ?config.rate_limit.route_limits,
        "Rate limit policy loaded"
    );

    Ok(AppState {
        catalog_service,
        rate_limiter,
        rate_limit_policy: Arc::new(rate_limit_policy),
    })
}

/// 等待Ctrl-C信号
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_infra::database::DatabaseSettings;
    use serde_json::json;

    #[tokio::test]
    async fn test_init_app_state_wires_service() {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;

        let manager = DatabaseManager::connect(&config.database.settings()).await.unwrap();
        manager.migrate().await.unwrap();

        let state = init_app_state(&config, &manager).unwrap();
        assert!(state.rate_limit_policy.enabled);

        let record = state
            .catalog_service
            .add_extension(&json!({
                "name": "Foo",
                "hyperlink": "http://x",
                "about": "desc",
                "image": "http://i",
                "language": "go",
            }))
            .await
            .unwrap();
        assert_eq!(record.language, "GO");
        assert_eq!(state.catalog_service.count_extensions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_init_app_state_rejects_bad_limits() {
        let mut config = Config::default();
        config.rate_limit.route_limits = vec!["fast".to_string()];

        let manager = DatabaseManager::connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .unwrap();
        assert!(init_app_state(&config, &manager).is_err());
    }
}
