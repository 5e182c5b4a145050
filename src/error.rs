use crate::fetch::error::FetchError;
use crate::query::error::QueryError;
use crate::spatial::error::GeometryError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdssError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to build table from records")]
    Frame(#[from] PolarsError),
}

impl From<GeometryError> for CdssError {
    fn from(error: GeometryError) -> Self {
        CdssError::Query(QueryError::Geometry(error))
    }
}

/// Broad category of a [`CdssError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input; no request was sent.
    Validation,
    UnknownParameter,
    ConflictingParameter,
    InvalidDate,
    /// Non-2xx response or transport failure, including timeouts.
    Fetch,
    /// Response body could not be read as records.
    Decode,
    PaginationLimitExceeded,
    /// Records could not be turned into a table.
    Table,
}

impl CdssError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CdssError::Query(QueryError::Validation { .. } | QueryError::Geometry(_)) => {
                ErrorKind::Validation
            }
            CdssError::Query(QueryError::UnknownParameter { .. }) => ErrorKind::UnknownParameter,
            CdssError::Query(QueryError::ConflictingParameter { .. }) => {
                ErrorKind::ConflictingParameter
            }
            CdssError::Query(QueryError::InvalidDate { .. }) => ErrorKind::InvalidDate,
            CdssError::Fetch(FetchError::InvalidPageSize(_)) => ErrorKind::Validation,
            CdssError::Fetch(FetchError::Decode { .. } | FetchError::MissingRecordField { .. }) => {
                ErrorKind::Decode
            }
            CdssError::Fetch(FetchError::PaginationLimitExceeded { .. }) => {
                ErrorKind::PaginationLimitExceeded
            }
            CdssError::Fetch(_) | CdssError::HttpClient(_) => ErrorKind::Fetch,
            CdssError::Frame(_) => ErrorKind::Table,
        }
    }

    /// Whether the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation
                | ErrorKind::UnknownParameter
                | ErrorKind::ConflictingParameter
                | ErrorKind::InvalidDate
        )
    }
}
