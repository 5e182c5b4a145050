//! Provides the `WaterRightsClient` for water right net amounts and transactions.
//! Obtained via [`Cdss::water_rights()`].

use crate::query::endpoint::Endpoint;
use crate::query::params::{RawParams, RADIUS};
use crate::{Aoi, Cdss, CdssError, ResultSet, Transport};
use bon::bon;

/// Typed requests against the `waterrights` endpoints.
///
/// Created by [`Cdss::water_rights()`]. Both net amounts and transactions accept
/// the same location and identifier filters.
pub struct WaterRightsClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> WaterRightsClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Current net amounts of water rights.
    #[builder]
    pub async fn net_amounts(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        wdid: Option<Vec<String>>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        self.fetch(
            Endpoint::WaterRightsNetAmount,
            filters(aoi, radius, county, division, water_district, wdid),
            page_size,
        )
        .await
    }

    /// Court decree transactions for water rights.
    #[builder]
    pub async fn transactions(
        &self,
        #[builder(into)] aoi: Option<Aoi>,
        radius: Option<f64>,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        wdid: Option<Vec<String>>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        self.fetch(
            Endpoint::WaterRightsTransaction,
            filters(aoi, radius, county, division, water_district, wdid),
            page_size,
        )
        .await
    }

    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: RawParams,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        self.client
            .records()
            .endpoint(endpoint)
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}

fn filters(
    aoi: Option<Aoi>,
    radius: Option<f64>,
    county: Option<String>,
    division: Option<u32>,
    water_district: Option<u32>,
    wdid: Option<Vec<String>>,
) -> RawParams {
    RawParams::new()
        .with_aoi(aoi)
        .maybe_with(RADIUS, radius)
        .maybe_with("county", county)
        .maybe_with("division", division)
        .maybe_with("water_district", water_district)
        .maybe_with("wdid", wdid)
}
