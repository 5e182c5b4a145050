//! Provides the `ClimateClient` for NOAA/CoAgMet climate stations, frost dates and
//! climate time series. Obtained via [`Cdss::climate()`].

use crate::query::encode::Timescale;
use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::{RawParams, RADIUS};
use crate::{Aoi, Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::{Datelike, NaiveDate};

/// Typed requests against the `climatedata` endpoints.
///
/// Created by [`Cdss::climate()`]. Covers station lookup, frost dates and daily or
/// monthly time series.
pub struct ClimateClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> ClimateClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Finds climate stations by location or attributes.
    #[builder]
    pub async fn stations(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        #[builder(into)] station_name: Option<String>,
        site_id: Option<Vec<String>>,
        water_district: Option<u32>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with_aoi(aoi)
            .maybe_with(RADIUS, radius)
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("station_name", station_name)
            .maybe_with("site_id", site_id)
            .maybe_with("water_district", water_district);

        self.client
            .records()
            .endpoint(Endpoint::ClimateStations)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Frost dates recorded at a climate station, bounded by calendar year.
    #[builder(start_fn = frost_dates)]
    #[doc(hidden)]
    pub async fn build_frost_dates(
        &self,
        #[builder(start_fn)] station_number: &str,
        start_year: Option<i32>,
        end_year: Option<i32>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with("station_number", station_number)
            .maybe_with("start_year", start_year)
            .maybe_with("end_year", end_year);

        self.client
            .records()
            .endpoint(Endpoint::ClimateFrostDates)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Daily or monthly climate measurements (e.g. `Precip`, `MaxTemp`).
    ///
    /// Monthly series are bounded by the calendar years of `start_date`/`end_date`.
    ///
    /// # Errors
    ///
    /// [`CdssError::Query`] when neither `station_number` nor `site_id` is given, or for
    /// a timescale other than day or month.
    #[builder]
    pub async fn time_series(
        &self,
        #[builder(into)] station_number: Option<String>,
        #[builder(into)] site_id: Option<String>,
        #[builder(into)] measure_type: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default = Timescale::Day)] timescale: Timescale,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        if station_number.is_none() && site_id.is_none() {
            return Err(
                QueryError::validation("climate time series need a station_number or site_id")
                    .into(),
            );
        }

        let params = RawParams::new()
            .maybe_with("station_number", station_number)
            .maybe_with("site_id", site_id)
            .maybe_with("measure_type", measure_type);

        let (endpoint, params) = match timescale {
            Timescale::Day => (
                Endpoint::ClimateTsDay,
                params
                    .maybe_with("start_date", start_date)
                    .maybe_with("end_date", end_date),
            ),
            Timescale::Month => (
                Endpoint::ClimateTsMonth,
                params
                    .maybe_with("start_year", start_date.map(|d| d.year()))
                    .maybe_with("end_year", end_date.map(|d| d.year())),
            ),
            other => {
                return Err(QueryError::validation(format!(
                    "climate time series are available by day or month, not {other}"
                ))
                .into())
            }
        };

        self.client
            .records()
            .endpoint(endpoint)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}
