use crate::error::ErrorBody;
use catalog_domain::{ExtensionRecord, NewExtension};
use utoipa::OpenApi;

/// OpenAPI文档配置
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::extensions::list_extensions,
        crate::handlers::extensions::add_extension,
    ),
    components(schemas(ExtensionRecord, NewExtension, ErrorBody)),
    tags(
        (name = "extensions", description = "扩展目录端点"),
    ),
    info(
        title = "Catalog API",
        description = "扩展目录服务",
        version = "1.0.0"
    ),
    servers(
        (url = "http://localhost:1000", description = "本地开发服务器"),
    )
)]
pub struct ApiDoc;
