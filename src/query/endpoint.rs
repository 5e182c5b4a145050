//! Static table describing every CDSS REST endpoint the crate can call.
//!
//! Each [`Endpoint`] maps to an [`EndpointDescriptor`]: its path under the API root,
//! the semantic parameter names it accepts with their wire names and encodings,
//! and the fixed parameters sent with every request.

use std::fmt;

/// Largest `pageSize` the CDSS v2 API accepts.
pub const MAX_PAGE_SIZE: usize = 50_000;

/// Field holding the record array in every CDSS v2 response.
pub const RECORDS_FIELD: &str = "ResultList";

const BASE_FIXED: &[(&str, &str)] = &[("format", "json"), ("dateFormat", "spaceSepToSeconds")];
const THIRD_PARTY_FIXED: &[(&str, &str)] = &[
    ("format", "json"),
    ("dateFormat", "spaceSepToSeconds"),
    ("includeThirdParty", "true"),
];

/// How a parameter value is validated and written to the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Passed through as-is.
    Text,
    /// Whole number, e.g. a division or district.
    Integer,
    /// Four-digit calendar or water year.
    Year,
    /// `true`/`false`.
    Bool,
    /// `YYYY-MM-DD` in, `MM-DD-YYYY` on the wire.
    Date,
    /// One repeated query parameter per element.
    List,
    /// Water class identifier, with `diversion`/`release` aliases.
    WaterClass,
    /// One of the diversion record types.
    DivRecType,
}

/// A parameter an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Name used by callers, e.g. `start_date`.
    pub name: &'static str,
    /// Name sent to the API, e.g. `min-measDate`.
    pub wire: &'static str,
    pub encoding: Encoding,
}

const fn p(name: &'static str, wire: &'static str, encoding: Encoding) -> ParamSpec {
    ParamSpec {
        name,
        wire,
        encoding,
    }
}

/// Immutable description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    /// Path relative to the API root, without slashes at either end.
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    /// Parameters sent with every request to this endpoint.
    pub fixed: &'static [(&'static str, &'static str)],
    /// Whether the endpoint accepts `aoi_point`/`polygon`/`radius`.
    pub spatial: bool,
    pub page_size_limit: usize,
    pub records_field: &'static str,
}

impl EndpointDescriptor {
    /// Looks up an accepted parameter by its semantic name.
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }
}

/// Every CDSS endpoint this crate knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ActiveCalls,
    HistoricalCalls,
    CallAnalysisByWdid,
    CallAnalysisByGnisId,
    SourceRouteFramework,
    SourceRouteAnalysis,
    ClimateStations,
    ClimateFrostDates,
    ClimateTsDay,
    ClimateTsMonth,
    GroundwaterWells,
    GroundwaterMeasurements,
    GeophysicalLogWells,
    GeophysicalLogPicks,
    CountyTable,
    WaterDistrictTable,
    WaterDivisionTable,
    ManagementDistrictTable,
    DesignatedBasinTable,
    TelemetryParamsTable,
    ClimateMeasTypeTable,
    DivRecTypesTable,
    StationFlagsTable,
    Structures,
    DivRecDay,
    DivRecMonth,
    DivRecYear,
    StageVolume,
    WaterClasses,
    SurfaceWaterStations,
    SurfaceWaterTsDay,
    SurfaceWaterTsMonth,
    SurfaceWaterTsWaterYear,
    TelemetryStations,
    TelemetryTsDay,
    TelemetryTsHour,
    TelemetryTsRaw,
    WaterRightsNetAmount,
    WaterRightsTransaction,
}

use Encoding::*;

const ADMIN_CALLS: &[ParamSpec] = &[
    p("division", "division", Integer),
    p("location_wdid", "locationWdid", Text),
    p("call_number", "callNumber", Text),
    p("start_date", "min-dateTimeSet", Date),
    p("end_date", "max-dateTimeSet", Date),
];

const CALL_ANALYSIS_WDID: &[ParamSpec] = &[
    p("wdid", "wdid", Text),
    p("admin_no", "adminNo", Text),
    p("start_date", "startDate", Date),
    p("end_date", "endDate", Date),
];

const CALL_ANALYSIS_GNIS: &[ParamSpec] = &[
    p("gnis_id", "gnisId", Text),
    p("admin_no", "adminNo", Text),
    p("stream_mile", "streamMile", Text),
    p("start_date", "startDate", Date),
    p("end_date", "endDate", Date),
];

const SOURCE_ROUTE_FRAMEWORK: &[ParamSpec] = &[
    p("division", "division", Integer),
    p("gnis_name", "gnisName", Text),
    p("water_district", "waterDistrict", Integer),
];

const SOURCE_ROUTE_ANALYSIS: &[ParamSpec] = &[
    p("lt_gnis_id", "ltGnisId", Text),
    p("lt_stream_mile", "ltStreamMile", Text),
    p("ut_gnis_id", "utGnisId", Text),
    p("ut_stream_mile", "utStreamMile", Text),
];

const CLIMATE_STATIONS: &[ParamSpec] = &[
    p("county", "county", Text),
    p("division", "division", Integer),
    p("station_name", "stationName", Text),
    p("site_id", "siteId", List),
    p("water_district", "waterDistrict", Integer),
];

const CLIMATE_FROST_DATES: &[ParamSpec] = &[
    p("station_number", "stationNum", Text),
    p("start_year", "min-calYear", Year),
    p("end_year", "max-calYear", Year),
];

const CLIMATE_TS_DAY: &[ParamSpec] = &[
    p("station_number", "stationNum", Text),
    p("site_id", "siteId", Text),
    p("measure_type", "measType", Text),
    p("start_date", "min-measDate", Date),
    p("end_date", "max-measDate", Date),
];

const CLIMATE_TS_MONTH: &[ParamSpec] = &[
    p("station_number", "stationNum", Text),
    p("site_id", "siteId", Text),
    p("measure_type", "measType", Text),
    p("start_year", "min-calYear", Year),
    p("end_year", "max-calYear", Year),
];

const GROUNDWATER_WELLS: &[ParamSpec] = &[
    p("county", "county", Text),
    p("well_id", "wellId", Text),
    p("division", "division", Integer),
    p("water_district", "waterDistrict", Integer),
    p("designated_basin", "designatedBasin", Text),
    p("management_district", "managementDistrict", Text),
];

const GROUNDWATER_MEASUREMENTS: &[ParamSpec] = &[
    p("well_id", "wellId", Text),
    p("start_date", "min-measurementDate", Date),
    p("end_date", "max-measurementDate", Date),
];

const GEOPHYSICAL_LOG_PICKS: &[ParamSpec] = &[p("well_id", "wellId", Text)];

const COUNTY_TABLE: &[ParamSpec] = &[p("county", "county", Text)];
const WATER_DISTRICT_TABLE: &[ParamSpec] = &[
    p("division", "division", Integer),
    p("water_district", "waterDistrict", Integer),
];
const WATER_DIVISION_TABLE: &[ParamSpec] = &[p("division", "division", Integer)];
const MANAGEMENT_DISTRICT_TABLE: &[ParamSpec] = &[p(
    "management_district",
    "managementDistrictName",
    Text,
)];
const DESIGNATED_BASIN_TABLE: &[ParamSpec] =
    &[p("designated_basin", "designatedBasinName", Text)];
const TELEMETRY_PARAMS_TABLE: &[ParamSpec] = &[p("parameter", "parameter", Text)];
const CLIMATE_MEAS_TYPE_TABLE: &[ParamSpec] = &[p("measure_type", "measType", Text)];
const DIVREC_TYPES_TABLE: &[ParamSpec] = &[p("divrectype", "divRecType", DivRecType)];
const STATION_FLAGS_TABLE: &[ParamSpec] = &[p("flag", "flag", Text)];

const STRUCTURES: &[ParamSpec] = &[
    p("county", "county", Text),
    p("division", "division", Integer),
    p("gnis_id", "gnisId", Text),
    p("water_district", "waterDistrict", Integer),
    p("wdid", "wdid", List),
];

const DIVREC: &[ParamSpec] = &[
    p("wdid", "wdid", List),
    p("wc_identifier", "wcIdentifier", WaterClass),
    p("start_date", "min-dataMeasDate", Date),
    p("end_date", "max-dataMeasDate", Date),
];

const STAGE_VOLUME: &[ParamSpec] = &[
    p("wdid", "wdid", List),
    p("start_date", "min-dataMeasDate", Date),
    p("end_date", "max-dataMeasDate", Date),
];

const WATER_CLASSES: &[ParamSpec] = &[
    p("wdid", "wdid", Text),
    p("county", "county", Text),
    p("division", "division", Integer),
    p("water_district", "waterDistrict", Integer),
    p("gnis_id", "gnisId", Text),
    p("wc_identifier", "wcIdentifier", WaterClass),
    p("divrectype", "divrectype", DivRecType),
    p("ciu_code", "ciuCode", Text),
    p("start_date", "min-porStart", Date),
    p("end_date", "min-porEnd", Date),
];

const SURFACE_WATER_STATIONS: &[ParamSpec] = &[
    p("abbrev", "abbrev", List),
    p("county", "county", Text),
    p("division", "division", Integer),
    p("station_name", "stationName", Text),
    p("usgs_id", "usgsSiteId", Text),
    p("water_district", "waterDistrict", Integer),
];

const SURFACE_WATER_TS_DAY: &[ParamSpec] = &[
    p("abbrev", "abbrev", Text),
    p("station_number", "stationNum", Text),
    p("usgs_id", "usgsSiteId", Text),
    p("start_date", "min-measDate", Date),
    p("end_date", "max-measDate", Date),
];

const SURFACE_WATER_TS_MONTH: &[ParamSpec] = &[
    p("abbrev", "abbrev", Text),
    p("station_number", "stationNum", Text),
    p("usgs_id", "usgsSiteId", Text),
    p("start_year", "min-calYear", Year),
    p("end_year", "max-calYear", Year),
];

const SURFACE_WATER_TS_WATER_YEAR: &[ParamSpec] = &[
    p("abbrev", "abbrev", Text),
    p("station_number", "stationNum", Text),
    p("usgs_id", "usgsSiteId", Text),
    p("start_year", "min-waterYear", Year),
    p("end_year", "max-waterYear", Year),
];

const TELEMETRY_STATIONS: &[ParamSpec] = &[
    p("abbrev", "abbrev", List),
    p("county", "county", Text),
    p("division", "division", Integer),
    p("gnis_id", "gnisId", Text),
    p("usgs_id", "usgsStationId", Text),
    p("water_district", "waterDistrict", Integer),
    p("wdid", "wdid", Text),
];

const TELEMETRY_TS: &[ParamSpec] = &[
    p("abbrev", "abbrev", Text),
    p("parameter", "parameter", Text),
    p("start_date", "startDate", Date),
    p("end_date", "endDate", Date),
    p("include_third_party", "includeThirdParty", Bool),
];

const WATER_RIGHTS: &[ParamSpec] = &[
    p("county", "county", Text),
    p("division", "division", Integer),
    p("water_district", "waterDistrict", Integer),
    p("wdid", "wdid", List),
];

impl Endpoint {
    /// Every endpoint, in table order.
    pub const ALL: [Endpoint; 39] = [
        Endpoint::ActiveCalls,
        Endpoint::HistoricalCalls,
        Endpoint::CallAnalysisByWdid,
        Endpoint::CallAnalysisByGnisId,
        Endpoint::SourceRouteFramework,
        Endpoint::SourceRouteAnalysis,
        Endpoint::ClimateStations,
        Endpoint::ClimateFrostDates,
        Endpoint::ClimateTsDay,
        Endpoint::ClimateTsMonth,
        Endpoint::GroundwaterWells,
        Endpoint::GroundwaterMeasurements,
        Endpoint::GeophysicalLogWells,
        Endpoint::GeophysicalLogPicks,
        Endpoint::CountyTable,
        Endpoint::WaterDistrictTable,
        Endpoint::WaterDivisionTable,
        Endpoint::ManagementDistrictTable,
        Endpoint::DesignatedBasinTable,
        Endpoint::TelemetryParamsTable,
        Endpoint::ClimateMeasTypeTable,
        Endpoint::DivRecTypesTable,
        Endpoint::StationFlagsTable,
        Endpoint::Structures,
        Endpoint::DivRecDay,
        Endpoint::DivRecMonth,
        Endpoint::DivRecYear,
        Endpoint::StageVolume,
        Endpoint::WaterClasses,
        Endpoint::SurfaceWaterStations,
        Endpoint::SurfaceWaterTsDay,
        Endpoint::SurfaceWaterTsMonth,
        Endpoint::SurfaceWaterTsWaterYear,
        Endpoint::TelemetryStations,
        Endpoint::TelemetryTsDay,
        Endpoint::TelemetryTsHour,
        Endpoint::TelemetryTsRaw,
        Endpoint::WaterRightsNetAmount,
        Endpoint::WaterRightsTransaction,
    ];

    /// The static descriptor for this endpoint.
    pub fn descriptor(self) -> EndpointDescriptor {
        let (name, path, params, spatial) = match self {
            Endpoint::ActiveCalls => (
                "active_calls",
                "administrativecalls/active",
                ADMIN_CALLS,
                false,
            ),
            Endpoint::HistoricalCalls => (
                "historical_calls",
                "administrativecalls/historical",
                ADMIN_CALLS,
                false,
            ),
            Endpoint::CallAnalysisByWdid => (
                "call_analysis_wdid",
                "analysisservices/callanalysisbywdid",
                CALL_ANALYSIS_WDID,
                false,
            ),
            Endpoint::CallAnalysisByGnisId => (
                "call_analysis_gnis",
                "analysisservices/callanalysisbygnisid",
                CALL_ANALYSIS_GNIS,
                false,
            ),
            Endpoint::SourceRouteFramework => (
                "source_route_framework",
                "analysisservices/watersourcerouteframework",
                SOURCE_ROUTE_FRAMEWORK,
                false,
            ),
            Endpoint::SourceRouteAnalysis => (
                "source_route_analysis",
                "analysisservices/watersourcerouteanalysis",
                SOURCE_ROUTE_ANALYSIS,
                false,
            ),
            Endpoint::ClimateStations => (
                "climate_stations",
                "climatedata/climatestations",
                CLIMATE_STATIONS,
                true,
            ),
            Endpoint::ClimateFrostDates => (
                "climate_frost_dates",
                "climatedata/climatestationfrostdates",
                CLIMATE_FROST_DATES,
                false,
            ),
            Endpoint::ClimateTsDay => (
                "climate_ts_day",
                "climatedata/climatestationtsday",
                CLIMATE_TS_DAY,
                false,
            ),
            Endpoint::ClimateTsMonth => (
                "climate_ts_month",
                "climatedata/climatestationtsmonth",
                CLIMATE_TS_MONTH,
                false,
            ),
            Endpoint::GroundwaterWells => (
                "gw_wells",
                "groundwater/waterlevels/wells",
                GROUNDWATER_WELLS,
                false,
            ),
            Endpoint::GroundwaterMeasurements => (
                "gw_well_measurements",
                "groundwater/waterlevels/wellmeasurements",
                GROUNDWATER_MEASUREMENTS,
                false,
            ),
            Endpoint::GeophysicalLogWells => (
                "gw_geophysical_wells",
                "groundwater/geophysicallogs/wells",
                GROUNDWATER_WELLS,
                false,
            ),
            Endpoint::GeophysicalLogPicks => (
                "gw_geolog_picks",
                "groundwater/geophysicallogs/geoplogpicks",
                GEOPHYSICAL_LOG_PICKS,
                false,
            ),
            Endpoint::CountyTable => ("ref_county", "referencetables/county", COUNTY_TABLE, false),
            Endpoint::WaterDistrictTable => (
                "ref_water_district",
                "referencetables/waterdistrict",
                WATER_DISTRICT_TABLE,
                false,
            ),
            Endpoint::WaterDivisionTable => (
                "ref_water_division",
                "referencetables/waterdivision",
                WATER_DIVISION_TABLE,
                false,
            ),
            Endpoint::ManagementDistrictTable => (
                "ref_management_district",
                "referencetables/managementdistrict",
                MANAGEMENT_DISTRICT_TABLE,
                false,
            ),
            Endpoint::DesignatedBasinTable => (
                "ref_designated_basin",
                "referencetables/designatedbasin",
                DESIGNATED_BASIN_TABLE,
                false,
            ),
            Endpoint::TelemetryParamsTable => (
                "ref_telemetry_params",
                "referencetables/telemetryparams",
                TELEMETRY_PARAMS_TABLE,
                false,
            ),
            Endpoint::ClimateMeasTypeTable => (
                "ref_climate_meas_type",
                "referencetables/climatestationmeastype",
                CLIMATE_MEAS_TYPE_TABLE,
                false,
            ),
            Endpoint::DivRecTypesTable => (
                "ref_divrec_types",
                "referencetables/divrectypes",
                DIVREC_TYPES_TABLE,
                false,
            ),
            Endpoint::StationFlagsTable => (
                "ref_station_flags",
                "referencetables/stationflags",
                STATION_FLAGS_TABLE,
                false,
            ),
            Endpoint::Structures => ("structures", "structures", STRUCTURES, true),
            Endpoint::DivRecDay => ("divrec_day", "structures/divrec/divrecday", DIVREC, false),
            Endpoint::DivRecMonth => (
                "divrec_month",
                "structures/divrec/divrecmonth",
                DIVREC,
                false,
            ),
            Endpoint::DivRecYear => ("divrec_year", "structures/divrec/divrecyear", DIVREC, false),
            Endpoint::StageVolume => (
                "stage_volume",
                "structures/divrec/stagevolume",
                STAGE_VOLUME,
                false,
            ),
            Endpoint::WaterClasses => (
                "water_classes",
                "structures/divrec/waterclasses",
                WATER_CLASSES,
                true,
            ),
            Endpoint::SurfaceWaterStations => (
                "sw_stations",
                "surfacewater/surfacewaterstations",
                SURFACE_WATER_STATIONS,
                true,
            ),
            Endpoint::SurfaceWaterTsDay => (
                "sw_ts_day",
                "surfacewater/surfacewatertsday",
                SURFACE_WATER_TS_DAY,
                false,
            ),
            Endpoint::SurfaceWaterTsMonth => (
                "sw_ts_month",
                "surfacewater/surfacewatertsmonth",
                SURFACE_WATER_TS_MONTH,
                false,
            ),
            Endpoint::SurfaceWaterTsWaterYear => (
                "sw_ts_water_year",
                "surfacewater/surfacewatertswateryear",
                SURFACE_WATER_TS_WATER_YEAR,
                false,
            ),
            Endpoint::TelemetryStations => (
                "telemetry_stations",
                "telemetrystations/telemetrystation",
                TELEMETRY_STATIONS,
                true,
            ),
            Endpoint::TelemetryTsDay => (
                "telemetry_ts_day",
                "telemetrystations/telemetrytimeseriesday",
                TELEMETRY_TS,
                false,
            ),
            Endpoint::TelemetryTsHour => (
                "telemetry_ts_hour",
                "telemetrystations/telemetrytimeserieshour",
                TELEMETRY_TS,
                false,
            ),
            Endpoint::TelemetryTsRaw => (
                "telemetry_ts_raw",
                "telemetrystations/telemetrytimeseriesraw",
                TELEMETRY_TS,
                false,
            ),
            Endpoint::WaterRightsNetAmount => (
                "water_rights_net_amount",
                "waterrights/netamount",
                WATER_RIGHTS,
                true,
            ),
            Endpoint::WaterRightsTransaction => (
                "water_rights_transaction",
                "waterrights/transaction",
                WATER_RIGHTS,
                true,
            ),
        };

        let fixed = match self {
            Endpoint::TelemetryStations => THIRD_PARTY_FIXED,
            _ => BASE_FIXED,
        };

        EndpointDescriptor {
            name,
            path,
            params,
            fixed,
            spatial,
            page_size_limit: MAX_PAGE_SIZE,
            records_field: RECORDS_FIELD,
        }
    }

    /// Logical name, e.g. `telemetry_stations`.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_paths_are_unique() {
        let names: HashSet<_> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        let paths: HashSet<_> = Endpoint::ALL.iter().map(|e| e.descriptor().path).collect();
        assert_eq!(names.len(), Endpoint::ALL.len());
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn descriptors_are_well_formed() {
        for endpoint in Endpoint::ALL {
            let d = endpoint.descriptor();
            assert!(!d.path.starts_with('/') && !d.path.ends_with('/'));
            assert_eq!(d.page_size_limit, MAX_PAGE_SIZE);
            assert_eq!(d.records_field, RECORDS_FIELD);
            assert!(d.fixed.contains(&("format", "json")));

            let semantic: HashSet<_> = d.params.iter().map(|s| s.name).collect();
            assert_eq!(semantic.len(), d.params.len(), "{endpoint} repeats a name");
            for reserved in ["aoi_point", "polygon", "radius", "page_size"] {
                assert!(d.param(reserved).is_none());
            }
        }
    }

    #[test]
    fn only_telemetry_stations_force_third_party() {
        for endpoint in Endpoint::ALL {
            let forced = endpoint
                .descriptor()
                .fixed
                .contains(&("includeThirdParty", "true"));
            assert_eq!(forced, endpoint == Endpoint::TelemetryStations);
        }
    }

    #[test]
    fn spatial_endpoints() {
        let spatial: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|e| e.descriptor().spatial)
            .collect();
        assert_eq!(
            spatial,
            vec![
                Endpoint::ClimateStations,
                Endpoint::Structures,
                Endpoint::WaterClasses,
                Endpoint::SurfaceWaterStations,
                Endpoint::TelemetryStations,
                Endpoint::WaterRightsNetAmount,
                Endpoint::WaterRightsTransaction,
            ]
        );
    }

    #[test]
    fn looks_up_wire_names() {
        let d = Endpoint::DivRecDay.descriptor();
        assert_eq!(d.param("start_date").unwrap().wire, "min-dataMeasDate");
        assert_eq!(d.param("wdid").unwrap().encoding, Encoding::List);
        assert!(d.param("abbrev").is_none());
        assert_eq!(Endpoint::TelemetryStations.to_string(), "telemetry_stations");
    }
}
