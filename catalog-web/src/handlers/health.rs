use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::error::ErrorBody;
use crate::AppState;
use serde::Serialize;
use tracing::warn;

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub extensions: u64,
}

/// 健康检查端点，不受速率限制
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.catalog_service.count_extensions().await {
        Ok(extensions) => Json(HealthResponse {
            status: "ok",
            extensions,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody::new("Storage unavailable")),
            )
                .into_response()
        }
    }
}
