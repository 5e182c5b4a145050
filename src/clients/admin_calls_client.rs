//! Provides the `AdminCallsClient` for active and historical administrative calls.
//! Obtained via [`Cdss::admin_calls()`].

use crate::query::endpoint::Endpoint;
use crate::query::params::RawParams;
use crate::{Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::NaiveDate;

/// Typed requests against the `administrativecalls` endpoints.
///
/// Created by [`Cdss::admin_calls()`]. `.calls()` picks the active or historical
/// endpoint and returns a [`ResultSet`].
pub struct AdminCallsClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> AdminCallsClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Administrative calls, filtered by division, location WDID, call number or date set.
    ///
    /// `active` (default `true`) picks the active calls endpoint; `false` queries
    /// historical calls.
    #[builder]
    pub async fn calls(
        &self,
        division: Option<u32>,
        #[builder(into)] location_wdid: Option<String>,
        #[builder(into)] call_number: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default = true)] active: bool,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let endpoint = if active {
            Endpoint::ActiveCalls
        } else {
            Endpoint::HistoricalCalls
        };

        let params = RawParams::new()
            .maybe_with("division", division)
            .maybe_with("location_wdid", location_wdid)
            .maybe_with("call_number", call_number)
            .maybe_with("start_date", start_date)
            .maybe_with("end_date", end_date);

        self.client
            .records()
            .endpoint(endpoint)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::fetch::paginator::testing::ScriptedTransport;
    use crate::{Cdss, CdssConfig};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn active_by_default_historical_on_request() {
        let client = Cdss::with_transport(CdssConfig::default(), ScriptedTransport::new());
        client
            .admin_calls()
            .calls()
            .division(1)
            .location_wdid("0100503")
            .call()
            .await
            .unwrap();
        client
            .admin_calls()
            .calls()
            .active(false)
            .start_date(NaiveDate::from_ymd_opt(2002, 7, 1).unwrap())
            .call()
            .await
            .unwrap();

        let calls = client.transport().calls();
        assert!(calls[0].url.ends_with("/administrativecalls/active/"));
        assert_eq!(calls[0].param("division"), Some("1"));
        assert_eq!(calls[0].param("locationWdid"), Some("0100503"));
        assert!(calls[1].url.ends_with("/administrativecalls/historical/"));
        assert_eq!(calls[1].param("min-dateTimeSet"), Some("07-01-2002"));
    }
}
