//! Sequential page loop over a CDSS endpoint.

use crate::fetch::error::FetchError;
use crate::fetch::page::decode_page;
use crate::fetch::transport::Transport;
use crate::query::params::QueryParameters;
use crate::records::result_set::Record;
use log::{debug, info, warn};

/// Ceiling on the number of full pages before giving up.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Drives `pageIndex` from 1 until a short page comes back.
///
/// Pages are fetched strictly one after another: the loop only knows it is done
/// once a page holds fewer than `page_size` records. An endpoint whose record count
/// is an exact multiple of `page_size` therefore costs one extra, empty request.
///
/// Any failure discards the pages collected so far.
#[derive(Debug, Clone)]
pub struct PageFetcher<T> {
    transport: T,
    max_pages: Option<usize>,
}

impl<T: Transport> PageFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }

    /// Sets the page ceiling. `None` loops until the server returns a short page.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches every page of `query` from `url` and concatenates the records in page order.
    ///
    /// # Errors
    ///
    /// * [`FetchError::InvalidPageSize`] for a page size of zero, before any request.
    /// * [`FetchError::Http`] for a non-2xx response, carrying status and body.
    /// * [`FetchError::Decode`] / [`FetchError::MissingRecordField`] for unreadable pages.
    /// * [`FetchError::PaginationLimitExceeded`] when the page ceiling is reached.
    /// * Transport failures ([`FetchError::Timeout`], [`FetchError::Network`]).
    pub async fn fetch(
        &self,
        url: &str,
        query: &QueryParameters,
        page_size: usize,
    ) -> Result<Vec<Record>, FetchError> {
        if page_size == 0 {
            return Err(FetchError::InvalidPageSize(page_size));
        }

        let field = query.records_field();
        let mut records = Vec::new();
        let mut page_index = 1;

        loop {
            if let Some(max_pages) = self.max_pages {
                if page_index > max_pages {
                    warn!("Stopping {} after {} full pages", url, max_pages);
                    return Err(FetchError::PaginationLimitExceeded {
                        url: url.to_string(),
                        max_pages,
                    });
                }
            }

            let response = self
                .transport
                .get(url, &query.paged(page_size, page_index))
                .await?;

            if !response.is_success() {
                warn!(
                    "Request to {} page {} failed with status {}",
                    url, page_index, response.status
                );
                return Err(FetchError::Http {
                    url: url.to_string(),
                    status: response.status,
                    body: response.body,
                });
            }

            let page = decode_page(url, &response.body, field)?;
            let count = page.len();
            debug!("Page {} of {} returned {} records", page_index, url, count);
            records.extend(page);

            if count < page_size {
                break;
            }
            page_index += 1;
        }

        info!(
            "Fetched {} records from {} in {} page(s)",
            records.len(),
            url,
            page_index
        );
        Ok(records)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;
    use crate::query::builder::QueryBuilder;
    use crate::query::endpoint::Endpoint;
    use crate::query::params::RawParams;

    const URL: &str = "https://dwr.state.co.us/Rest/GET/api/v2/structures/";

    fn query() -> QueryParameters {
        QueryBuilder::build(Endpoint::Structures, &RawParams::new().with("county", "Boulder"))
            .unwrap()
    }

    fn ids(records: &[Record]) -> Vec<u64> {
        records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    #[tokio::test]
    async fn concatenates_full_pages_and_partial_tail() {
        // M = 3 full pages of N = 4, then k = 2.
        let transport = ScriptedTransport::new()
            .page(0, 4)
            .page(4, 4)
            .page(8, 4)
            .page(12, 2);
        let fetcher = PageFetcher::new(transport);

        let records = fetcher.fetch(URL, &query(), 4).await.unwrap();
        assert_eq!(ids(&records), (0..14).collect::<Vec<_>>());

        let calls = fetcher.transport().calls();
        assert_eq!(calls.len(), 4);
        for (i, call) in calls.iter().enumerate() {
            assert_eq!(call.url, URL);
            assert_eq!(call.param("pageSize"), Some("4"));
            assert_eq!(call.param("pageIndex"), Some((i + 1).to_string().as_str()));
            assert_eq!(call.param("county"), Some("Boulder"));
        }
    }

    #[tokio::test]
    async fn empty_first_page_is_an_empty_result() {
        let fetcher = PageFetcher::new(ScriptedTransport::new().page(0, 0));
        let records = fetcher.fetch(URL, &query(), 100).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(fetcher.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn zero_page_size_makes_no_calls() {
        let fetcher = PageFetcher::new(ScriptedTransport::new().page(0, 1));
        let err = fetcher.fetch(URL, &query(), 0).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidPageSize(0)));
        assert!(fetcher.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn exact_multiple_costs_one_extra_request() {
        let transport = ScriptedTransport::new().page(0, 3).page(3, 3).page(6, 0);
        let fetcher = PageFetcher::new(transport);
        let records = fetcher.fetch(URL, &query(), 3).await.unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(fetcher.transport().calls().len(), 3);
    }

    #[tokio::test]
    async fn failed_page_discards_earlier_pages() {
        let transport = ScriptedTransport::new()
            .page(0, 2)
            .respond(500, "Internal Server Error");
        let fetcher = PageFetcher::new(transport);
        let err = fetcher.fetch(URL, &query(), 2).await.unwrap_err();
        match err {
            FetchError::Http { status, body, url } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
                assert_eq!(url, URL);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_page_fails() {
        let fetcher = PageFetcher::new(ScriptedTransport::new().respond(200, "not json"));
        let err = fetcher.fetch(URL, &query(), 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn stops_at_page_ceiling() {
        let transport = ScriptedTransport::new().page(0, 1).page(1, 1).page(2, 1);
        let fetcher = PageFetcher::new(transport).with_max_pages(Some(2));
        let err = fetcher.fetch(URL, &query(), 1).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::PaginationLimitExceeded { max_pages: 2, .. }
        ));
        assert_eq!(fetcher.transport().calls().len(), 2);
    }

    #[tokio::test]
    async fn list_values_are_repeated_parameters() {
        let query = QueryBuilder::build(
            Endpoint::DivRecYear,
            &RawParams::new().with("wdid", vec!["0100503", "0100504"]),
        )
        .unwrap();
        let fetcher = PageFetcher::new(ScriptedTransport::new().page(0, 0));
        fetcher.fetch(URL, &query, 50).await.unwrap();

        let calls = fetcher.transport().calls();
        assert_eq!(calls[0].params("wdid"), vec!["0100503", "0100504"]);
    }
}
