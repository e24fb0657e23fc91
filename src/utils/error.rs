//! Error handling for tabtex
//!
//! This module provides a unified error type and result type for table
//! layout, document assembly and template filling.

use std::fmt;

/// Layout error type
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The table or document description is malformed
    InvalidSpec { message: String },
    /// Grid dimensions disagree with the resolved column count
    ShapeMismatch {
        message: String,
        expected: Option<usize>,
        found: Option<usize>,
    },
    /// A template referenced a slot that was never provided
    Template { message: String },
    /// Configuration text could not be parsed (JSON / TOML syntax)
    Config { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::InvalidSpec { message } => {
                write!(f, "Invalid table spec: {}", message)
            }
            LayoutError::ShapeMismatch {
                message,
                expected,
                found,
            } => {
                if let (Some(e), Some(n)) = (expected, found) {
                    write!(
                        f,
                        "Shape mismatch: {} (expected {}, found {})",
                        message, e, n
                    )
                } else {
                    write!(f, "Shape mismatch: {}", message)
                }
            }
            LayoutError::Template { message } => {
                write!(f, "Template error: {}", message)
            }
            LayoutError::Config { message } => {
                write!(f, "Config error: {}", message)
            }
            LayoutError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        LayoutError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Config {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LayoutError {
    fn from(err: toml::de::Error) -> Self {
        LayoutError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

// Convenience constructors for errors
impl LayoutError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LayoutError::InvalidSpec {
            message: message.into(),
        }
    }

    pub fn shape_counts(message: impl Into<String>, expected: usize, found: usize) -> Self {
        LayoutError::ShapeMismatch {
            message: message.into(),
            expected: Some(expected),
            found: Some(found),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        LayoutError::Template {
            message: message.into(),
        }
    }

    /// Whether this error was raised by table validation rather than IO or parsing
    pub fn is_spec_error(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidSpec { .. } | LayoutError::ShapeMismatch { .. }
        )
    }
}
