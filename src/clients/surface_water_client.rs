//! Provides the `SurfaceWaterClient` for surface water stations and their historical
//! daily, monthly and water-year time series. Obtained via [`Cdss::surface_water()`].

use crate::query::encode::{water_year, Timescale};
use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::{RawParams, RADIUS};
use crate::{Aoi, Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::{Datelike, NaiveDate};

/// Typed requests against the `surfacewater` endpoints.
///
/// Created by [`Cdss::surface_water()`].
pub struct SurfaceWaterClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> SurfaceWaterClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Finds surface water stations by location or attributes.
    #[builder]
    pub async fn stations(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        abbrev: Option<Vec<String>>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        #[builder(into)] station_name: Option<String>,
        #[builder(into)] usgs_id: Option<String>,
        water_district: Option<u32>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with_aoi(aoi)
            .maybe_with(RADIUS, radius)
            .maybe_with("abbrev", abbrev)
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("station_name", station_name)
            .maybe_with("usgs_id", usgs_id)
            .maybe_with("water_district", water_district);

        self.client
            .records()
            .endpoint(Endpoint::SurfaceWaterStations)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Fetches a surface water station's historical time series.
    ///
    /// Daily series are bounded by `start_date`/`end_date` directly. Monthly series are
    /// bounded by the calendar years of those dates, and [`Timescale::Year`] series by
    /// their water years.
    ///
    /// # Errors
    ///
    /// [`CdssError::Query`] for raw or hourly timescales, and when none of `abbrev`,
    /// `station_number` or `usgs_id` is given.
    #[builder]
    pub async fn time_series(
        &self,
        #[builder(into)] abbrev: Option<String>,
        #[builder(into)] station_number: Option<String>,
        #[builder(into)] usgs_id: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default = Timescale::Day)] timescale: Timescale,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        if abbrev.is_none() && station_number.is_none() && usgs_id.is_none() {
            return Err(QueryError::validation(
                "surface water time series need an abbrev, station_number or usgs_id",
            )
            .into());
        }

        let params = RawParams::new()
            .maybe_with("abbrev", abbrev)
            .maybe_with("station_number", station_number)
            .maybe_with("usgs_id", usgs_id);

        let (endpoint, params) = match timescale {
            Timescale::Day => (
                Endpoint::SurfaceWaterTsDay,
                params
                    .maybe_with("start_date", start_date)
                    .maybe_with("end_date", end_date),
            ),
            Timescale::Month => (
                Endpoint::SurfaceWaterTsMonth,
                params
                    .maybe_with("start_year", start_date.map(|d| d.year()))
                    .maybe_with("end_year", end_date.map(|d| d.year())),
            ),
            Timescale::Year => (
                Endpoint::SurfaceWaterTsWaterYear,
                params
                    .maybe_with("start_year", start_date.map(water_year))
                    .maybe_with("end_year", end_date.map(water_year)),
            ),
            other => {
                return Err(QueryError::validation(format!(
                    "surface water time series are available by day, month or water year, not {other}"
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
