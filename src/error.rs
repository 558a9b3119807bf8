//! Error types for OData URI compilation.

use thiserror::Error;

/// The main error type for URI compilation.
#[derive(Debug, Error)]
pub enum UriError {
    /// A property path does not exist on the resolved entity type.
    #[error("Property path '{path}' not found on entity type '{entity_type}'{}", suggestion_suffix(.suggestion))]
    PathNotFound {
        path: String,
        entity_type: String,
        suggestion: Option<String>,
    },

    /// A node or fragment shape the visitor cannot render.
    #[error("Unsupported node: {0}")]
    UnsupportedNode(String),

    /// A literal value is incompatible with its declared datatype.
    #[error("Invalid value for {data_type}: {value}")]
    InvalidValue { data_type: String, value: String },

    /// The predicate tree nests deeper than the configured limit.
    #[error("Predicate tree exceeds maximum depth of {0}")]
    DepthExceeded(usize),

    /// Metadata could not be loaded or parsed.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed encoded query string.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}

impl UriError {
    /// Create a path-not-found error.
    pub fn path_not_found(path: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self::PathNotFound {
            path: path.into(),
            entity_type: entity_type.into(),
            suggestion: None,
        }
    }

    /// Attach a "did you mean" hint to a path-not-found error.
    pub fn with_suggestion(self, hint: Option<String>) -> Self {
        match self {
            Self::PathNotFound {
                path, entity_type, ..
            } => Self::PathNotFound {
                path,
                entity_type,
                suggestion: hint,
            },
            other => other,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(data_type: impl std::fmt::Display, value: impl std::fmt::Display) -> Self {
        Self::InvalidValue {
            data_type: data_type.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for URI compilation.
pub type UriResult<T> = Result<T, UriError>;
