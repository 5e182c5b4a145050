//! Provides the `ReferenceClient` for CDSS lookup tables. Obtained via [`Cdss::reference()`].

use crate::query::endpoint::Endpoint;
use crate::query::error::QueryError;
use crate::query::params::RawParams;
use crate::{Cdss, CdssError, ResultSet, Transport};
use bon::bon;
use std::fmt;
use std::str::FromStr;

/// The reference tables served under `referencetables/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTable {
    County,
    WaterDistrict,
    WaterDivision,
    ManagementDistrict,
    DesignatedBasin,
    TelemetryParams,
    ClimateMeasType,
    DivRecTypes,
    StationFlags,
}

impl ReferenceTable {
    pub const ALL: [ReferenceTable; 9] = [
        ReferenceTable::County,
        ReferenceTable::WaterDistrict,
        ReferenceTable::WaterDivision,
        ReferenceTable::ManagementDistrict,
        ReferenceTable::DesignatedBasin,
        ReferenceTable::TelemetryParams,
        ReferenceTable::ClimateMeasType,
        ReferenceTable::DivRecTypes,
        ReferenceTable::StationFlags,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            ReferenceTable::County => Endpoint::CountyTable,
            ReferenceTable::WaterDistrict => Endpoint::WaterDistrictTable,
            ReferenceTable::WaterDivision => Endpoint::WaterDivisionTable,
            ReferenceTable::ManagementDistrict => Endpoint::ManagementDistrictTable,
            ReferenceTable::DesignatedBasin => Endpoint::DesignatedBasinTable,
            ReferenceTable::TelemetryParams => Endpoint::TelemetryParamsTable,
            ReferenceTable::ClimateMeasType => Endpoint::ClimateMeasTypeTable,
            ReferenceTable::DivRecTypes => Endpoint::DivRecTypesTable,
            ReferenceTable::StationFlags => Endpoint::StationFlagsTable,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ReferenceTable::County => "county",
            ReferenceTable::WaterDistrict => "waterdistrict",
            ReferenceTable::WaterDivision => "waterdivision",
            ReferenceTable::ManagementDistrict => "managementdistrict",
            ReferenceTable::DesignatedBasin => "designatedbasin",
            ReferenceTable::TelemetryParams => "telemetryparams",
            ReferenceTable::ClimateMeasType => "climatestationmeastype",
            ReferenceTable::DivRecTypes => "divrectypes",
            ReferenceTable::StationFlags => "stationflags",
        }
    }
}

impl fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReferenceTable {
    type Err = QueryError;

    /// Accepts the table's path name, ignoring case, `_` and `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        ReferenceTable::ALL
            .into_iter()
            .find(|table| table.name() == wanted)
            .ok_or_else(|| QueryError::validation(format!("'{s}' is not a reference table")))
    }
}

/// Typed requests against the `referencetables` endpoints.
///
/// Created by [`Cdss::reference()`]. Pick the table with [`ReferenceTable`].
pub struct ReferenceClient<'a, T> {
    /// The client the requests are sent through.
    client: &'a Cdss<T>,
}

#[bon]
impl<'a, T: Transport> ReferenceClient<'a, T> {
    pub(crate) fn new(client: &'a Cdss<T>) -> Self {
        Self { client }
    }

    /// Fetches a reference table.
    ///
    /// Filters only apply to the tables that accept them: `county` for
    /// [`ReferenceTable::County`], `division`/`water_district` for the district and
    /// division tables, and so on. A filter the table does not accept fails with
    /// [`CdssError::Query`] before any request.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cdss::{Cdss, CdssError, ReferenceTable};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CdssError> {
    /// let cdss = Cdss::new()?;
    /// let districts = cdss
    ///     .reference()
    ///     .table(ReferenceTable::WaterDistrict)
    ///     .division(1)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = table)]
    #[doc(hidden)]
    pub async fn build_table(
        &self,
        #[builder(start_fn)] table: ReferenceTable,
        #[builder(into)] county: Option<String>,
        division: Option<u32>,
        water_district: Option<u32>,
        #[builder(into)] management_district: Option<String>,
        #[builder(into)] designated_basin: Option<String>,
        #[builder(into)] parameter: Option<String>,
        #[builder(into)] measure_type: Option<String>,
        #[builder(into)] divrectype: Option<String>,
        #[builder(into)] flag: Option<String>,
        page_size: Option<usize>,
    ) -> Result<ResultSet, CdssError> {
        let params = RawParams::new()
            .maybe_with("county", county)
            .maybe_with("division", division)
            .maybe_with("water_district", water_district)
            .maybe_with("management_district", management_district)
            .maybe_with("designated_basin", designated_basin)
            .maybe_with("parameter", parameter)
            .maybe_with("measure_type", measure_type)
            .maybe_with("divrectype", divrectype)
            .maybe_with("flag", flag);

        self.client
            .records()
            .endpoint(table.endpoint())
            .params(params)
            .maybe_page_size(page_size)
            .call()
            .await
    }
}
