//! Provides the `GroundwaterClient` for water-level and geophysical-log wells.
//! Obtained via [`Cdss::groundwater()`].

use crate::query::endpoint::Endpoint;
use crate::query::params::RawParams;
use crate::{Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use chrono::NaiveDate;

/// Typed requests against the `groundwater` endpoints.
///
/// Created by [`Cdss::groundwater()`].
pub struct GroundwaterClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> GroundwaterClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Wells with water-level measurements.
    #[builder]
    pub async fn water_level_wells(
        &self,
        #[builder(into)] county: Option<String>,
        #[builder(into)] well_id: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        #[builder(into)] designated_basin: Option<String>,
        #[builder(into)] management_district: Option<String>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = well_filters(
            county,
            well_id,
            division,
            water_district,
            designated_basin,
            management_district,
        );
        self.client
            .records()
            .endpoint(Endpoint::GroundwaterWells)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Water-level measurements for one well.
    #[builder(start_fn = well_measurements)]
    #[doc(hidden)]
    pub async fn build_well_measurements(
        &self,
        #[builder(start_fn)] well_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .with("well_id", well_id)
            .maybe_with("start_date", start_date)
            .maybe_with("end_date", end_date);
        self.client
            .records()
            .endpoint(Endpoint::GroundwaterMeasurements)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Wells with geophysical logs.
    #[builder]
    pub async fn geophysical_log_wells(
        &self,
        #[builder(into)] county: Option<String>,
        #[builder(into)] well_id: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        #[builder(into)] designated_basin: Option<String>,
        #[builder(into)] management_district: Option<String>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = well_filters(
            county,
            well_id,
            division,
            water_district,
            designated_basin,
            management_district,
        );
        self.client
            .records()
            .endpoint(Endpoint::GeophysicalLogWells)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }

    /// Formation picks from a well's geophysical log.
    #[builder(start_fn = geophysical_log_picks)]
    #[doc(hidden)]
    pub async fn build_geophysical_log_picks(
        &self,
        #[builder(start_fn)] well_id: &str,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        self.client
            .records()
            .endpoint(Endpoint::GeophysicalLogPicks)
            .params(RawParams::new().with("well_id", well_id))
            .maybe_page_size(page_size)
            .call()
            .await
    }
}

fn well_filters(
    county: Option<String>,
    well_id: Option<String>,
    division: Option<u32>,
    water_district: Option<u32>,
    designated_basin: Option<String>,
    management_district: Option<String>,
) -> RawParams {
    RawParams::new()
        .maybe_with("county", county)
        .maybe_with("well_id", well_id)
        .maybe_with("division", division)
        .maybe_with("water_district", water_district)
        .maybe_with("designated_basin", designated_basin)
        .maybe_with("management_district", management_district)
}
