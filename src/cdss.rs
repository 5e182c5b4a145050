//! Main entry point for querying the Colorado Decision Support Systems (CDSS) REST API.
//!
//! [`Cdss`] owns the configuration and the HTTP transport. Each call validates its
//! parameters, pages through the endpoint and, for polygon searches, masks the
//! fetched records to the polygon before returning them.

use crate::clients::admin_calls_client::AdminCallsClient;
use crate::clients::analysis_client::AnalysisClient;
use crate::clients::climate_client::ClimateClient;
use crate::clients::groundwater_client::GroundwaterClient;
use crate::clients::reference_client::ReferenceClient;
use crate::clients::structures_client::StructuresClient;
use crate::clients::surface_water_client::SurfaceWaterClient;
use crate::clients::telemetry_client::TelemetryClient;
use crate::clients::water_rights_client::WaterRightsClient;
use crate::config::CdssConfig;
use crate::error::CdssError;
use crate::fetch::paginator::PageFetcher;
use crate::fetch::transport::{HttpTransport, Transport};
use crate::query::builder::QueryBuilder;
use crate::query::encode::yearly_batches;
use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::{QueryParameters, RawParams};
use crate::records::result_set::ResultSet;
use crate::spatial::filter::filter_by_polygon;
use bon::bon;
use chrono::NaiveDate;
use futures_util::{stream, StreamExt, TryStreamExt};
use log::{debug, info};

/// Client for the CDSS REST API.
///
/// Create one with [`Cdss::new()`] (defaults plus environment overrides) or
/// [`Cdss::with_config()`]. The client is cheap to share by reference; calls on
/// it are independent and can run concurrently.
///
/// # Examples
///
/// ```no_run
/// use cdss::{Cdss, CdssError, Endpoint, RawParams};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), CdssError> {
/// let cdss = Cdss::new()?;
///
/// // Any endpoint, with semantic parameter names.
/// let records = cdss
///     .records()
///     .endpoint(Endpoint::DivRecDay)
///     .params(
///         RawParams::new()
///             .with("wdid", "0100503")
///             .with("start_date", "2020-01-01"),
///     )
///     .call()
///     .await?;
///
/// // Or through a typed family client.
/// let flows = cdss
///     .telemetry()
///     .time_series("PLACHECO")
///     .parameter("DISCHRG")
///     .call()
///     .await?;
/// println!("{} + {} records", records.len(), flows.len());
/// # Ok(())
/// # }
/// ```
pub struct Cdss<T = HttpTransport> {
    config: CdssConfig,
    fetcher: PageFetcher<T>,
}

impl Cdss<HttpTransport> {
    /// Creates a client from [`CdssConfig::from_env()`].
    ///
    /// # Errors
    ///
    /// Returns [`CdssError::Query`] for a malformed `CDSS_TIMEOUT_SECS`, or
    /// [`CdssError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, CdssError> {
        Self::with_config(CdssConfig::from_env()?)
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(config: CdssConfig) -> Result<Self, CdssError> {
        let transport = HttpTransport::new(config.timeout).map_err(CdssError::HttpClient)?;
        Ok(Self::with_transport(config, transport))
    }
}

#[bon]
impl<T: Transport> Cdss<T> {
    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(config: CdssConfig, transport: T) -> Self {
        let fetcher = PageFetcher::new(transport).with_max_pages(config.max_pages);
        Self { config, fetcher }
    }

    pub fn config(&self) -> &CdssConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.fetcher.transport()
    }

    /// Fetches every record of `endpoint` matching `params`.
    ///
    /// `page_size` defaults to the endpoint's maximum (50,000).
    ///
    /// # Errors
    ///
    /// Validation errors ([`CdssError::Query`], or [`CdssError::Fetch`] with
    /// `InvalidPageSize`) are returned before any request is sent. Network, HTTP and
    /// decoding failures are returned as [`CdssError::Fetch`]; no partial results are kept.
    #[builder]
    pub async fn records(
        &self,
        endpoint: Endpoint,
        #[builder(default)] params: RawParams,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let query = QueryBuilder::build(endpoint, &params)?;
        self.fetch(query, page_size).await
    }

    pub(crate) async fn fetch(
        &self,
        query: QueryParameters,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let endpoint = query.endpoint();
        let descriptor = endpoint.descriptor();
        let page_size = page_size.unwrap_or(descriptor.page_size_limit);
        if page_size > descriptor.page_size_limit {
            return Err(QueryError::validation(format!(
                "page size {page_size} exceeds the limit of {} for {endpoint}",
                descriptor.page_size_limit
            ))
            .into());
        }

        let url = self.config.endpoint_url(descriptor.path);
        info!("Requesting {} from {}", endpoint, url);
        let mut records = self.fetcher.fetch(&url, &query, page_size).await?;

        if let Some(polygon) = query.polygon_mask() {
            let fetched = records.len();
            records = filter_by_polygon(records, polygon);
            debug!(
                "Polygon mask kept {} of {} {} records",
                records.len(),
                fetched,
                endpoint
            );
        }

        Ok(ResultSet::new(endpoint, records))
    }

    /// Fetches `[start, end]` one calendar year at a time and concatenates the results.
    ///
    /// `params` must not set `start_date`/`end_date`; each batch sets them. Every batch
    /// query is validated before the first request. Batches run up to
    /// `max_concurrent_batches` at a time and are returned in date order.
    pub(crate) async fn records_by_year(
        &self,
        endpoint: Endpoint,
        params: RawParams,
        start: NaiveDate,
        end: NaiveDate,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let batches = yearly_batches(start, end);
        if batches.is_empty() {
            return Err(QueryError::validation(format!(
                "start date {start} is after end date {end}"
            ))
            .into());
        }

        let queries = batches
            .into_iter()
            .map(|(batch_start, batch_end)| {
                let batch = params
                    .clone()
                    .with("start_date", batch_start)
                    .with("end_date", batch_end);
                QueryBuilder::build(endpoint, &batch)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Fetching {} in {} yearly batches from {} to {}",
            endpoint,
            queries.len(),
            start,
            end
        );

        let results: Vec<ResultSet> = stream::iter(
            queries
                .into_iter()
                .map(|query| self.fetch(query, page_size)),
        )
        .buffered(self.config.max_concurrent_batches.max(1))
        .try_collect()
        .await?;

        let records = results.into_iter().flat_map(ResultSet::into_records).collect();
        Ok(ResultSet::new(endpoint, records))
    }

    /// Telemetry stations and their real-time time series.
    pub fn telemetry(&self) -> TelemetryClient<'_, T> {
        TelemetryClient::new(self)
    }

    /// Surface water stations and their historical time series.
    pub fn surface_water(&self) -> SurfaceWaterClient<'_, T> {
        SurfaceWaterClient::new(self)
    }

    /// Structures, diversion records, stage/volume and water classes.
    pub fn structures(&self) -> StructuresClient<'_, T> {
        StructuresClient::new(self)
    }

    /// Climate stations, frost dates and climate time series.
    pub fn climate(&self) -> ClimateClient<'_, T> {
        ClimateClient::new(self)
    }

    /// Water-level and geophysical-log wells.
    pub fn groundwater(&self) -> GroundwaterClient<'_, T> {
        GroundwaterClient::new(self)
    }

    /// Water rights net amounts and transactions.
    pub fn water_rights(&self) -> WaterRightsClient<'_, T> {
        WaterRightsClient::new(self)
    }

    /// Active and historical administrative calls.
    pub fn admin_calls(&self) -> AdminCallsClient<'_, T> {
        AdminCallsClient::new(self)
    }

    /// Lookup tables (counties, districts, parameters, flags...).
    pub fn reference(&self) -> ReferenceClient<'_, T> {
        ReferenceClient::new(self)
    }

    /// Call analysis and water source route services.
    pub fn analysis(&self) -> AnalysisClient<'_, T> {
        AnalysisClient::new(self)
    }
}
