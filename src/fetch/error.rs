use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {url} has no '{field}' record list")]
    MissingRecordField { url: String, field: String },

    #[error("Gave up on {url} after {max_pages} full pages")]
    PaginationLimitExceeded { url: String, max_pages: usize },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
