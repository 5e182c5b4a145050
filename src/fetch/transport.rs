//! HTTP transport used by the page fetcher.

use crate::fetch::error::FetchError;
use log::warn;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Raw response from a single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests with query-string parameters.
///
/// Implementations report connection-level failures as errors and hand back every
/// HTTP response, successful or not, as a [`TransportResponse`].
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<TransportResponse, FetchError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<TransportResponse, FetchError>> + Send {
        (**self).get(url, query)
    }
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a client with the given request timeout and gzip support.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<TransportResponse, FetchError> {
        let map_err = |source: reqwest::Error| {
            if source.is_timeout() {
                warn!("Request to {} timed out", url);
                FetchError::Timeout {
                    url: url.to_string(),
                    source,
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        Ok(TransportResponse { status, body })
    }
}
