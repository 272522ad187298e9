//! Validation error types

use std::fmt;

/// Malformed client input, rejected before any storage access
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// String doesn't parse as the expected type (e.g., UUID)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body doesn't match the record shape
    InvalidBody { reason: String },

    /// Query string can't be decoded
    InvalidQuery { reason: String },

    /// Filter names a field the resource doesn't have
    UnknownFilter { resource: &'static str, field: String },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidBody { reason } => write!(f, "invalid request body: {}", reason),
            Self::InvalidQuery { reason } => write!(f, "invalid query string: {}", reason),
            Self::UnknownFilter { resource, field } => {
                write!(f, "{} cannot be filtered by '{}'", resource, field)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
