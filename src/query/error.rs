use crate::query::endpoint::Endpoint;
use crate::spatial::error::GeometryError;
use thiserror::Error;

/// Errors raised while validating and encoding query parameters.
///
/// All of these are raised before any network request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid query: {message}")]
    Validation { message: String },

    #[error("Unknown parameter '{name}' for endpoint {endpoint}")]
    UnknownParameter { endpoint: Endpoint, name: String },

    #[error("Parameters '{first}' and '{second}' cannot be combined for endpoint {endpoint}")]
    ConflictingParameter {
        endpoint: Endpoint,
        first: String,
        second: String,
    },

    #[error("Could not parse '{value}' as a date for parameter '{parameter}'")]
    InvalidDate {
        parameter: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl QueryError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        QueryError::Validation {
            message: message.into(),
        }
    }
}
