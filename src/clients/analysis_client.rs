//! Provides the `AnalysisClient` for the call analysis and water source route services.
//! Obtained via [`Cdss::analysis()`].
//!
//! Call analysis over long date ranges tends to be rejected by the server, so both call
//! analysis methods can split the range into calendar years (`batch(true)`) and fetch the
//! years concurrently, up to [`CdssConfig::max_concurrent_batches`](crate::CdssConfig) at a time.

use crate::query::endpoint::Endpoint;
use crate::query::params::RawParams;
use crate::{Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::{Local, NaiveDate};

/// Start of the range used by batched call analysis when no start date is given.
fn default_batch_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Typed requests against the `analysisservices` endpoints.
///
/// Created by [`Cdss::analysis()`].
pub struct AnalysisClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> AnalysisClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Percentage of time a structure was out of priority, and the calling structure,
    /// for a water right identified by WDID and administration number.
    ///
    /// With `batch(true)` the range is fetched one calendar year per request; a missing
    /// `start_date` then defaults to 1900-01-01 and a missing `end_date` to today.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cdss::{Cdss, CdssError};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CdssError> {
    /// let cdss = Cdss::new()?;
    /// let analysis = cdss
    ///     .analysis()
    ///     .call_analysis_by_wdid("0801001")
    ///     .admin_no("10000.00000")
    ///     .start_date(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap())
    ///     .batch(true)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = call_analysis_by_wdid)]
    #[doc(hidden)]
    pub async fn build_call_analysis_by_wdid(
        &self,
        #[builder(start_fn)] wdid: &str,
        #[builder(into)] admin_no: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default)] batch: bool,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with("wdid", wdid)
            .maybe_with("admin_no", admin_no);
        self.call_analysis(
            Endpoint::CallAnalysisByWdid,
            params,
            start_date,
            end_date,
            batch,
            page_size,
        )
        .await
    }

    /// Call analysis for a stream location identified by GNIS ID and stream mile.
    ///
    /// Batching works as for [`call_analysis_by_wdid`](Self::build_call_analysis_by_wdid).
    #[builder(start_fn = call_analysis_by_gnis_id)]
    #[doc(hidden)]
    pub async fn build_call_analysis_by_gnis_id(
        &self,
        #[builder(start_fn)] gnis_id: &str,
        #[builder(into)] admin_no: Option<String>,
        stream_mile: Option<f64>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default)] batch: bool,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with("gnis_id", gnis_id)
            .maybe_with("admin_no", admin_no)
            .maybe_with("stream_mile", stream_mile.map(|m| m.to_string()));
        self.call_analysis(
            Endpoint::CallAnalysisByGnisId,
            params,
            start_date,
            end_date,
            batch,
            page_size,
        )
        .await
    }

    /// The DWR water source route framework.
    #[builder]
    pub async fn source_route_framework(
        &self,
        division: Option<u32>,
        #[builder(into)] gnis_name: Option<String>,
        water_district: Option<u32>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .maybe_with("division", division)
            .maybe_with("gnis_name", gnis_name)
            .maybe_with("water_district", water_district);
        self.client
            .records()
            .endpoint(Endpoint::SourceRouteFramework)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// WDIDs (with stream miles) located between a lower and an upper stream terminus.
    #[builder]
    pub async fn source_route_analysis(
        &self,
        #[builder(into)] lt_gnis_id: Option<String>,
        lt_stream_mile: Option<f64>,
        #[builder(into)] ut_gnis_id: Option<String>,
        ut_stream_mile: Option<f64>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .maybe_with("lt_gnis_id", lt_gnis_id)
            .maybe_with("lt_stream_mile", lt_stream_mile.map(|m| m.to_string()))
            .maybe_with("ut_gnis_id", ut_gnis_id)
            .maybe_with("ut_stream_mile", ut_stream_mile.map(|m| m.to_string()));
        self.client
            .records()
            .endpoint(Endpoint::SourceRouteAnalysis)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    async fn call_analysis(
        &self,
        endpoint: Endpoint,
        params: RawParams,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        batch: bool,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        if batch {
            let start = start_date.unwrap_or_else(default_batch_start);
            let end = end_date.unwrap_or_else(|| Local::now().date_naive());
            return self
                .client
                .records_by_year(endpoint, params, start, end, page_size)
                .await;
        }

        self.client
            .records()
            .endpoint(endpoint)
            .params(
                params
                    .maybe_with("start_date", start_date)
                    .maybe_with("end_date", end_date),
            )
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

    fn cdss() -> Cdss<ScriptedTransport> {
        Cdss::with_transport(
            CdssConfig::default().with_max_concurrent_batches(2),
            ScriptedTransport::new(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn single_request_without_batching() {
        let client = cdss();
        client
            .analysis()
            .call_analysis_by_wdid("0801001")
            .admin_no("10000.00000")
            .start_date(date(2015, 1, 1))
            .end_date(date(2018, 12, 31))
            .call()
            .await
            .unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].url.ends_with("/analysisservices/callanalysisbywdid/"));
        assert_eq!(calls[0].param("adminNo"), Some("10000.00000"));
        assert_eq!(calls[0].param("startDate"), Some("01-01-2015"));
        assert_eq!(calls[0].param("endDate"), Some("12-31-2018"));
    }

    #[tokio::test]
    async fn batching_issues_one_request_per_year() {
        let client = cdss();
        client
            .analysis()
            .call_analysis_by_gnis_id("00178949")
            .stream_mile(25.5)
            .start_date(date(2016, 3, 1))
            .end_date(date(2018, 2, 1))
            .batch(true)
            .call()
            .await
            .unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 3);
        let mut starts: Vec<&str> = calls.iter().filter_map(|c| c.param("startDate")).collect();
        starts.sort();
        assert_eq!(starts, vec!["01-01-2017", "01-01-2018", "03-01-2016"]);
        assert!(calls.iter().all(|c| c.param("streamMile") == Some("25.5")));
    }

    #[tokio::test]
    async fn source_route_services() {
        let client = cdss();
        client
            .analysis()
            .source_route_framework()
            .gnis_name("South Platte River")
            .call()
            .await
            .unwrap();
        client
            .analysis()
            .source_route_analysis()
            .lt_gnis_id("00178949")
            .lt_stream_mile(0.0)
            .ut_gnis_id("00178949")
            .ut_stream_mile(100.5)
            .call()
            .await
            .unwrap();

        let calls = client.transport().calls();
        assert!(calls[0].url.ends_with("/watersourcerouteframework/"));
        assert_eq!(calls[0].param("gnisName"), Some("South Platte River"));
        assert!(calls[1].url.ends_with("/watersourcerouteanalysis/"));
        assert_eq!(calls[1].param("ltStreamMile"), Some("0"));
        assert_eq!(calls[1].param("utStreamMile"), Some("100.5"));
    }
}
