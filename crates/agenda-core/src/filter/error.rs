//! Error types for the filter-state codec.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while reading or writing a query string.
///
/// Unrecognized category or date-window tokens are not errors; they are
/// dropped or defaulted during decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The query string is not valid `application/x-www-form-urlencoded` data.
    #[error("malformed query string: {message}")]
    MalformedQuery {
        /// Description of the decoding failure.
        message: String,
    },

    /// The query parameters could not be encoded.
    #[error("failed to encode query string: {message}")]
    Encode {
        /// Description of the encoding failure.
        message: String,
    },
}

impl FilterError {
    /// Creates a malformed query error.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        FilterError::MalformedQuery {
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        FilterError::Encode {
            message: message.into(),
        }
    }
}
