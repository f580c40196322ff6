use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use crate::handlers;
use crate::openapi::ApiDoc;
use crate::security::rate_limit_middleware;
use crate::AppState;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// 创建应用路由
///
/// 目录路由经过速率限制；健康检查和OpenAPI文档不受限制。
pub fn create_router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/", get(handlers::list_extensions))
        .route("/add_extension", post(handlers::add_extension))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .merge(catalog_routes)
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // 展示层从其他源调用本服务
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
