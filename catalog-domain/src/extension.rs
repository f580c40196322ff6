use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ExtensionRecord 表示目录中的一条扩展记录
///
/// `id` 由存储层在插入时分配，线上格式中序列化为 `extID`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtensionRecord {
    #[serde(rename = "extID")]
    pub id: i32,
    pub name: String,
    pub hyperlink: String,
    pub about: String,
    pub image: String,
    pub language: String,
}

/// NewExtension 是通过校验的写入载荷，尚未分配 `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewExtension {
    pub name: String,
    pub hyperlink: String,
    pub about: String,
    pub image: String,
    pub language: String,
}

impl NewExtension {
    /// 将语言代码统一为大写
    pub fn normalized(mut self) -> Self {
        self.language = self.language.to_uppercase();
        self
    }
}

/// LanguageFilter 用于列表查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageFilter {
    /// 匹配所有记录
    Any,
    /// 匹配指定语言（已规范化为大写）
    Language(String),
}

impl LanguageFilter {
    /// 从查询参数解析过滤条件
    ///
    /// 缺失、为空或包含非字母字符的参数一律视为 `Any`，
    /// 合法参数转换为大写。
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(token) if !token.is_empty() && token.chars().all(char::is_alphabetic) => {
                LanguageFilter::Language(token.to_uppercase())
            }
            _ => LanguageFilter::Any,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, LanguageFilter::Any)
    }
}
