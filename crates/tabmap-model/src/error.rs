//! Error types for template loading and model invariants.

use thiserror::Error;

/// Errors raised while building or loading a [`crate::Template`].
///
/// Every variant is an initialization failure: a session cannot start
/// without a valid template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No template was supplied at all.
    #[error("the 'template' parameter is required")]
    TemplateRequired,

    /// The template string is not valid JSON.
    #[error("the 'template' parameter is not a valid JSON string: {0}")]
    InvalidJson(String),

    /// The template has no columns.
    #[error("invalid template: no columns were provided")]
    NoColumns,

    /// `columns` is present but not an array.
    #[error("invalid template: columns should be an array of objects")]
    ColumnsNotArray,

    /// A column entry is not a JSON object.
    #[error("invalid template: column {index} should be an object")]
    ColumnNotObject { index: usize },

    /// A column has neither a usable name nor a key.
    #[error("invalid template: each column should have a 'name' or a 'key' (column {index})")]
    MissingName { index: usize },

    /// Two columns share a destination key.
    #[error("invalid template: duplicate keys are not allowed ({0})")]
    DuplicateKey(String),

    /// A column names a combiner that does not exist.
    #[error("invalid template: unknown combiner '{name}' for column '{key}'")]
    UnknownCombiner { key: String, name: String },

    /// A combiner was registered for a key the template does not define.
    #[error("template has no column with key '{0}'")]
    UnknownColumn(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::DuplicateKey("email".to_string());
        assert_eq!(
            err.to_string(),
            "invalid template: duplicate keys are not allowed (email)"
        );
    }
}
