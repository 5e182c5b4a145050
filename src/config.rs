//! Client configuration.

use crate::fetch::paginator::DEFAULT_MAX_PAGES;
use crate::query::error::QueryError;
use std::time::Duration;

/// Root of the CDSS REST API, version 2.
pub const DEFAULT_BASE_URL: &str = "https://dwr.state.co.us/Rest/GET/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 4;

/// Environment variable overriding [`CdssConfig::base_url`].
pub const ENV_API_HOST: &str = "CDSS_API_HOST";
/// Environment variable overriding [`CdssConfig::timeout`], in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CDSS_TIMEOUT_SECS";

/// Settings for a [`Cdss`](crate::Cdss) client.
///
/// # Examples
///
/// ```
/// use cdss::CdssConfig;
/// use std::time::Duration;
///
/// let config = CdssConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_max_pages(Some(100));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdssConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Full pages fetched before giving up. `None` removes the ceiling.
    pub max_pages: Option<usize>,
    /// How many yearly batches the call-analysis helpers fetch at once.
    pub max_concurrent_batches: usize,
}

impl Default for CdssConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_pages: Some(DEFAULT_MAX_PAGES),
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
        }
    }
}

impl CdssConfig {
    /// Defaults, with `CDSS_API_HOST` and `CDSS_TIMEOUT_SECS` applied when set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Validation`] if `CDSS_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> Result<Self, QueryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, QueryError> {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_API_HOST).filter(|h| !h.trim().is_empty()) {
            config = config.with_base_url(host.trim());
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    QueryError::validation(format!(
                        "{ENV_TIMEOUT_SECS} must be a positive number of seconds, got '{raw}'"
                    ))
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Clamped to at least 1.
    pub fn with_max_concurrent_batches(mut self, batches: usize) -> Self {
        self.max_concurrent_batches = batches.max(1);
        self
    }

    /// Full URL of an endpoint path, with the trailing slash the API expects.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path)
    }
}
