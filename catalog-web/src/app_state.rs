use crate::security::RateLimitPolicy;
use catalog_infra::security::RateLimiter;
use catalog_service::CatalogService;
use std::sync::Arc;

/// 应用状态
/// 包含所有需要的服务实例
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub rate_limit_policy: Arc<RateLimitPolicy>,
}
