use catalog_domain::SchemaError;
use catalog_infra::database::StorageError;
use thiserror::Error;

/// 目录服务错误
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 写入载荷未通过结构校验，未访问存储
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
