//! Error types for moabit.
//!
//! All fallible operations return [`Result`]. System errors (`Io`) bubble up
//! unchanged so callers can distinguish a broken filesystem from a broken
//! file; application errors carry a message and an optional source chain.

use thiserror::Error;

/// Result type alias using `MoabitError`.
pub type Result<T> = std::result::Result<T, MoabitError>;

/// Main error type for all moabit operations.
#[derive(Debug, Error)]
pub enum MoabitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl MoabitError {
    /// Create a `Parsing` error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a `Parsing` error with a source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an `ImageProcessing` error.
    pub fn image_processing<S: Into<String>>(message: S) -> Self {
        Self::ImageProcessing {
            message: message.into(),
            source: None,
        }
    }

    /// Create an `ImageProcessing` error with a source.
    pub fn image_processing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageProcessing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a `Validation` error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a `Validation` error with a source.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<image::ImageError> for MoabitError {
    fn from(err: image::ImageError) -> Self {
        MoabitError::ImageProcessing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
