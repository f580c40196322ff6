use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_domain::{ExtensionRecord, NewExtension};
use crate::error::{ApiError, ErrorBody};
use crate::AppState;
use serde_json::Value;

/// 列出扩展
/// GET /?lang={language}
///
/// 只取第一个 `lang` 参数；非法的语言参数按无过滤处理。
#[utoipa::path(
    get,
    path = "/",
    tag = "extensions",
    params(
        ("lang" = Option<String>, Query, description = "按语言过滤（仅字母，大小写不敏感）")
    ),
    responses(
        (status = 200, description = "扩展列表", body = [ExtensionRecord]),
        (status = 429, description = "请求过于频繁"),
        (status = 500, description = "存储错误", body = ErrorBody)
    )
)]
pub async fn list_extensions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ExtensionRecord>>, ApiError> {
    let lang = params
        .iter()
        .find(|(key, _)| key == "lang")
        .map(|(_, value)| value.as_str());

    let records = state.catalog_service.get_extensions(lang).await?;
    Ok(Json(records))
}

/// 添加扩展
/// POST /add_extension
#[utoipa::path(
    post,
    path = "/add_extension",
    tag = "extensions",
    request_body(content = NewExtension, description = "扩展写入载荷", content_type = "application/json"),
    responses(
        (status = 201, description = "已存储的扩展", body = ExtensionRecord),
        (status = 400, description = "载荷未通过校验", body = ErrorBody),
        (status = 429, description = "请求过于频繁"),
        (status = 500, description = "存储错误", body = ErrorBody)
    )
)]
pub async fn add_extension(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let record = state.catalog_service.add_extension(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}
