use crate::error::CatalogError;
use async_trait::async_trait;
use catalog_domain::{validate_new_extension, ExtensionRecord, LanguageFilter};
use catalog_infra::database::ExtensionRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 目录服务trait
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// 列出扩展记录
    ///
    /// `language` 缺失、为空或含非字母字符时返回全部记录；
    /// 否则按大写语言代码过滤。
    async fn get_extensions(
        &self,
        language: Option<&str>,
    ) -> Result<Vec<ExtensionRecord>, CatalogError>;

    /// 校验并写入一条扩展记录，返回带id的存储行
    async fn add_extension(&self, payload: &Value) -> Result<ExtensionRecord, CatalogError>;

    async fn count_extensions(&self) -> Result<u64, CatalogError>;
}

pub struct DefaultCatalogService<R: ExtensionRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ExtensionRepository + ?Sized> DefaultCatalogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ExtensionRepository + ?Sized> CatalogService for DefaultCatalogService<R> {
    async fn get_extensions(
        &self,
        language: Option<&str>,
    ) -> Result<Vec<ExtensionRecord>, CatalogError> {
        let filter = LanguageFilter::from_token(language);
        if let LanguageFilter::Language(code) = &filter {
            debug!(language = %code, "Listing extensions by language");
        }

        self.repository.list(&filter).await.map_err(|e| {
            error!(error = %e, "Failed to list extensions");
            CatalogError::from(e)
        })
    }

    async fn add_extension(&self, payload: &Value) -> Result<ExtensionRecord, CatalogError> {
        let input = validate_new_extension(payload)?.normalized();

        let record = self.repository.insert(input).await.map_err(|e| {
            error!(error = %e, "Failed to insert extension");
            CatalogError::from(e)
        })?;

        info!(id = record.id, name = %record.name, language = %record.language, "Extension added");
        Ok(record)
    }

    async fn count_extensions(&self) -> Result<u64, CatalogError> {
        Ok(self.repository.count().await?)
    }
}
