//! Error types for the JSON layout

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Logger name abbreviation pattern could not be compiled
    #[error("Invalid logger pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {attribute}: {message}")]
    InvalidConfiguration { attribute: String, message: String },

    /// Charset name not supported by the encoder
    #[error("Unsupported charset '{0}'")]
    UnsupportedCharset(String),

    /// Unknown log level label
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),
}

impl LayoutError {
    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::InvalidConfiguration {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported charset error
    pub fn charset(name: impl Into<String>) -> Self {
        LayoutError::UnsupportedCharset(name.into())
    }
}
