//! Provides the `StructuresClient` for administrative structures (ditches, reservoirs,
//! wells...) and their diversion records. Obtained via [`Cdss::structures()`].

use crate::query::encode::Timescale;
use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::{RawParams, RADIUS};
use crate::{Aoi, Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::NaiveDate;

/// Typed requests against the `structures` endpoints.
///
/// Created by [`Cdss::structures()`]. Covers structure lookup, diversion records,
/// stage/volume and water classes.
pub struct StructuresClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> StructuresClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Finds structures by location, county, division, GNIS ID, water district or WDID.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cdss::{Cdss, CdssError, LonLat, Polygon};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CdssError> {
    /// let cdss = Cdss::new()?;
    /// let boundary = Polygon::new(vec![
    ///     LonLat(-105.3, 40.0),
    ///     LonLat(-105.1, 40.0),
    ///     LonLat(-105.1, 40.2),
    ///     LonLat(-105.3, 40.2),
    /// ])?;
    /// // Only structures inside the polygon are returned.
    /// let ditches = cdss.structures().structures().aoi(boundary).call().await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn structures(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        #[builder(into)] gnis_id: Option<String>,
        water_district: Option<u32>,
        wdid: Option<Vec<String>>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with_aoi(aoi)
            .maybe_with(RADIUS, radius)
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("gnis_id", gnis_id)
            .maybe_with("water_district", water_district)
            .maybe_with("wdid", wdid);

        self.client
            .records()
            .endpoint(Endpoint::Structures)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Daily, monthly or yearly diversion/release records for one or more WDIDs.
    ///
    /// `wc_identifier` accepts a water class ID or the aliases `diversion`/`release`
    /// (and their short forms such as `div`, `rel`).
    #[builder(start_fn = diversion_records)]
    #[doc(hidden)]
    pub async fn build_diversion_records(
        &self,
        #[builder(start_fn)] wdid: Vec<String>,
        #[builder(into)] wc_identifier: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        #[builder(default = Timescale::Day)] timescale: Timescale,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let endpoint = match timescale {
            Timescale::Day => Endpoint::DivRecDay,
            Timescale::Month => Endpoint::DivRecMonth,
            Timescale::Year => Endpoint::DivRecYear,
            other => {
                return Err(QueryError::validation(format!(
                    "diversion records are available by day, month or year, not {other}"
                ))
                .into())
            }
        };

        let params = RawParams::new()
            .with("wdid", wdid)
            .maybe_with("wc_identifier", wc_identifier)
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

    /// Reservoir stage and volume records.
    #[builder(start_fn = stage_volume)]
    #[doc(hidden)]
    pub async fn build_stage_volume(
        &self,
        #[builder(start_fn)] wdid: Vec<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with("wdid", wdid)
            .maybe_with("start_date", start_date)
            .maybe_with("end_date", end_date);

        self.client
            .records()
            .endpoint(Endpoint::StageVolume)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Water classes recorded at structures.
    ///
    /// `start_date`/`end_date` bound the period of record.
    #[builder]
    pub async fn water_classes(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        #[builder(into)] wdid: Option<String>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        #[builder(into)] gnis_id: Option<String>,
        #[builder(into)] wc_identifier: Option<String>,
        #[builder(into)] divrectype: Option<String>,
        #[builder(into)] ciu_code: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with_aoi(aoi)
            .maybe_with(RADIUS, radius)
            .maybe_with("wdid", wdid)
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("water_district", water_district)
            .maybe_with("gnis_id", gnis_id)
            .maybe_with("wc_identifier", wc_identifier)
            .maybe_with("divrectype", divrectype)
            .maybe_with("ciu_code", ciu_code)
            .maybe_with("start_date", start_date)
            .maybe_with("end_date", end_date);

        self.client
            .records()
            .endpoint(Endpoint::WaterClasses)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}
