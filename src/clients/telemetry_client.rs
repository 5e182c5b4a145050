//! Provides the `TelemetryClient` for real-time telemetry stations and their time series.
//!
//! Obtained via [`Cdss::telemetry()`].

use crate::query::encode::Timescale;
use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::{RawParams, RADIUS};
use crate::{Aoi, Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::NaiveDate;

/// Parameter requested when none is given: discharge.
pub const DEFAULT_TELEMETRY_PARAMETER: &str = "DISCHRG";

/// Typed requests against the `telemetrystations` endpoints.
pub struct TelemetryClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> TelemetryClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Finds telemetry stations, optionally around an area of interest.
    ///
    /// Third-party stations are always included.
    ///
    /// # Arguments
    ///
    /// * `aoi` - Point or polygon to search around. Polygon results are masked to the polygon.
    /// * `radius` - Search radius in miles (default 20, at most 150). Needs `aoi`.
    /// * `abbrev` - One or more station abbreviations.
    /// * `county`, `division`, `gnis_id`, `usgs_id`, `water_district`, `wdid` - Attribute filters.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cdss::{Cdss, CdssError, LonLat};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CdssError> {
    /// let cdss = Cdss::new()?;
    /// let stations = cdss
    ///     .telemetry()
    ///     .stations()
    ///     .aoi(LonLat(-105.27, 40.01))
    ///     .radius(15.0)
    ///     .call()
    ///     .await?;
    /// println!("{}", stations.to_dataframe()?);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn stations(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        abbrev: Option<Vec<String>>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        #[builder(into)] gnis_id: Option<String>,
        #[builder(into)] usgs_id: Option<String>,
        water_district: Option<u32>,
        #[builder(into)] wdid: Option<String>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with_aoi(aoi)
            .maybe_with(RADIUS, radius)
            .maybe_with("abbrev", abbrev)
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("gnis_id", gnis_id)
            .maybe_with("usgs_id", usgs_id)
            .maybe_with("water_district", water_district)
            .maybe_with("wdid", wdid);

        self.client
            .records()
            .endpoint(Endpoint::TelemetryStations)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Fetches raw, hourly or daily telemetry readings for one station.
    ///
    /// # Arguments
    ///
    /// * `abbrev` - Station abbreviation, e.g. `"PLACHECO"`.
    /// * `parameter` - Measured parameter (default `DISCHRG`).
    /// * `timescale` - [`Timescale::Raw`], [`Timescale::Hour`] or [`Timescale::Day`] (default).
    /// * `start_date`, `end_date` - Optional bounds; omitted bounds are left to the server.
    /// * `include_third_party` - Include third-party data (default `true`).
    ///
    /// # Errors
    ///
    /// [`CdssError::Query`] for a monthly or yearly timescale, which telemetry does not offer.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cdss::{Cdss, CdssError, Timescale};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CdssError> {
    /// let cdss = Cdss::new()?;
    /// let hourly = cdss
    ///     .telemetry()
    ///     .time_series("PLACHECO")
    ///     .timescale(Timescale::Hour)
    ///     .start_date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap())
    ///     .end_date(NaiveDate::from_ymd_opt(2023, 5, 31).unwrap())
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = time_series)]
    #[doc(hidden)]
    pub async fn build_time_series(
        &self,
        #[builder(start_fn)] abbrev: &str,
        #[builder(into)] parameter: Option<String>,
        #[builder(default = Timescale::Day)] timescale: Timescale,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default = true)] include_third_party: bool,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let endpoint = match timescale {
            Timescale::Raw => Endpoint::TelemetryTsRaw,
            Timescale::Hour => Endpoint::TelemetryTsHour,
            Timescale::Day => Endpoint::TelemetryTsDay,
            other => {
                return Err(QueryError::validation(format!(
                    "telemetry time series are available as raw, hour or day, not {other}"
                ))
                .into())
            }
        };

        let params = RawParams::new()
            .with("abbrev", abbrev)
            .with(
                "parameter",
                parameter.unwrap_or_else(|| DEFAULT_TELEMETRY_PARAMETER.to_string()),
            )
            .maybe_with("start_date", start_date)
            .maybe_with("end_date", end_date)
            .with("include_third_party", include_third_party);

        self.client
            .records()
            .endpoint(endpoint)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}
