use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_domain::FieldError;
use catalog_service::CatalogError;
use serde::Serialize;
use utoipa::ToSchema;

/// 错误响应体
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,

    /// 校验失败的字段（仅结构校验错误时出现）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

/// ApiError 将服务层错误映射为HTTP响应
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Json(JsonRejection),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Json(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Catalog(CatalogError::Schema(err)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    fields: err.fields().to_vec(),
                },
            ),
            // 存储错误细节只写日志，不返回给调用方
            ApiError::Catalog(CatalogError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Internal storage error"),
            ),
            ApiError::Json(rejection) => {
                (rejection.status(), ErrorBody::new(rejection.body_text()))
            }
        };

        (status, Json(body)).into_response()
    }
}
