use crate::extension::NewExtension;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// 可选的数值标识字段，输入时忽略
pub const IGNORED_ID_FIELDS: [&str; 2] = ["extID", "id"];

/// 不允许为空字符串的字段
const NON_EMPTY_FIELDS: [&str; 2] = ["name", "language"];

/// 字段校验失败原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    WrongType { expected: &'static str },
    Empty,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(field: &str, kind: FieldErrorKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{} is required", self.field),
            FieldErrorKind::WrongType { expected } => {
                write!(f, "{} must be a {}", self.field, expected)
            }
            FieldErrorKind::Empty => write!(f, "{} must not be empty", self.field),
        }
    }
}

/// SchemaError 表示写入载荷未通过结构校验
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<FieldError>),
}

impl SchemaError {
    /// 出错的字段列表（载荷不是对象时为空）
    pub fn fields(&self) -> &[FieldError] {
        match self {
            SchemaError::NotAnObject => &[],
            SchemaError::InvalidFields(fields) => fields,
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 校验扩展写入载荷
///
/// 只做结构校验：载荷必须是对象，五个字符串字段必须存在且类型正确，
/// `name` 与 `language` 不能为空。`extID`/`id` 如果出现必须是数字，
/// 其值被忽略。未知字段被忽略。所有错误一次性返回。
pub fn validate_new_extension(payload: &Value) -> Result<NewExtension, SchemaError> {
    let object = payload.as_object().ok_or(SchemaError::NotAnObject)?;
    let mut errors = Vec::new();

    for field in IGNORED_ID_FIELDS {
        if let Some(value) = object.get(field) {
            if !value.is_number() {
                errors.push(FieldError::new(
                    field,
                    FieldErrorKind::WrongType { expected: "number" },
                ));
            }
        }
    }

    let mut take = |field: &str| match string_field(object, field) {
        Ok(value) => value,
        Err(error) => {
            errors.push(error);
            String::new()
        }
    };
    let input = NewExtension {
        name: take("name"),
        hyperlink: take("hyperlink"),
        about: take("about"),
        image: take("image"),
        language: take("language"),
    };

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(SchemaError::InvalidFields(errors))
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, FieldError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(FieldError::new(field, FieldErrorKind::Missing)),
        Some(Value::String(value)) => {
            if value.is_empty() && NON_EMPTY_FIELDS.contains(&field) {
                Err(FieldError::new(field, FieldErrorKind::Empty))
            } else {
                Ok(value.clone())
            }
        }
        Some(_) => Err(FieldError::new(
            field,
            FieldErrorKind::WrongType { expected: "string" },
        )),
    }
}
