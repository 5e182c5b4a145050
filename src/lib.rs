mod cdss;
mod clients;
mod config;
mod error;
mod fetch;
mod query;
mod records;
mod spatial;

pub use cdss::*;
pub use config::*;
pub use error::{CdssError, ErrorKind};

pub use clients::admin_calls_client::*;
pub use clients::analysis_client::*;
pub use clients::climate_client::*;
pub use clients::groundwater_client::*;
pub use clients::reference_client::*;
pub use clients::structures_client::*;
pub use clients::surface_water_client::*;
pub use clients::telemetry_client::*;
pub use clients::water_rights_client::*;

pub use query::builder::QueryBuilder;
pub use query::encode::{encode_date, water_year, yearly_batches, Timescale};
pub use query::endpoint::{
    Encoding, Endpoint, EndpointDescriptor, ParamSpec, MAX_PAGE_SIZE, RECORDS_FIELD,
};
pub use query::error::QueryError;
pub use query::params::{ParamValue, QueryParameters, RawParams};

pub use fetch::error::FetchError;
pub use fetch::paginator::{PageFetcher, DEFAULT_MAX_PAGES};
pub use fetch::transport::{HttpTransport, Transport, TransportResponse};

pub use records::frame::{column_names, records_to_dataframe};
pub use records::result_set::{Record, ResultSet};

pub use spatial::aoi::{Aoi, SpatialQuery, DEFAULT_RADIUS_MILES, MAX_RADIUS_MILES};
pub use spatial::error::GeometryError;
pub use spatial::filter::{filter_by_point, filter_by_polygon, record_location};
pub use spatial::geometry::{LonLat, Polygon};
