pub mod extension;
pub mod validation;

pub use extension::{ExtensionRecord, LanguageFilter, NewExtension};
pub use validation::{validate_new_extension, FieldError, FieldErrorKind, SchemaError};
