//! Caller-supplied parameter values and the validated, wire-ready result.

use crate::query::endpoint::Endpoint;
use crate::spatial::aoi::Aoi;
use crate::spatial::geometry::{LonLat, Polygon};
use chrono::NaiveDate;

/// Semantic name of the point area-of-interest parameter.
pub const AOI_POINT: &str = "aoi_point";
/// Semantic name of the polygon area-of-interest parameter.
pub const POLYGON: &str = "polygon";
/// Semantic name of the search radius parameter, in miles.
pub const RADIUS: &str = "radius";

/// A single, not yet validated, parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    List(Vec<String>),
    Point(LonLat),
    Polygon(Polygon),
}

impl ParamValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ParamValue::Text(_) => "text",
            ParamValue::Integer(_) => "integer",
            ParamValue::Number(_) => "number",
            ParamValue::Bool(_) => "bool",
            ParamValue::Date(_) => "date",
            ParamValue::List(_) => "list",
            ParamValue::Point(_) => "point",
            ParamValue::Polygon(_) => "polygon",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<LonLat> for ParamValue {
    fn from(value: LonLat) -> Self {
        ParamValue::Point(value)
    }
}

impl From<Polygon> for ParamValue {
    fn from(value: Polygon) -> Self {
        ParamValue::Polygon(value)
    }
}

/// Semantic parameters for one call, in insertion order.
///
/// Setting a name twice replaces the earlier value in place.
///
/// # Examples
///
/// ```
/// use cdss::RawParams;
///
/// let params = RawParams::new()
///     .with("wdid", vec!["0100503", "0100504"])
///     .with("start_date", "2015-01-01")
///     .maybe_with("end_date", None::<&str>);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    entries: Vec<(String, ParamValue)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Like [`RawParams::with`], but does nothing for `None`.
    pub fn maybe_with<V: Into<ParamValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Adds the area of interest under `aoi_point` or `polygon`.
    pub fn with_aoi(self, aoi: Option<Aoi>) -> Self {
        match aoi {
            Some(Aoi::Point(point)) => self.with(AOI_POINT, point),
            Some(Aoi::Polygon(polygon)) => self.with(POLYGON, polygon),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Validated query parameters for one endpoint call, in wire form.
///
/// Paging parameters are not included; the fetcher adds them per page.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    endpoint: Endpoint,
    pairs: Vec<(String, String)>,
    mask: Option<Polygon>,
}

impl QueryParameters {
    pub(crate) fn new(endpoint: Endpoint, pairs: Vec<(String, String)>, mask: Option<Polygon>) -> Self {
        Self {
            endpoint,
            pairs,
            mask,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Wire `(name, value)` pairs. List parameters appear once per element.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// All values sent under a wire name.
    pub fn get_all(&self, wire_name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == wire_name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Polygon to apply to the fetched records, if the query used one.
    pub fn polygon_mask(&self) -> Option<&Polygon> {
        self.mask.as_ref()
    }

    pub fn records_field(&self) -> &'static str {
        self.endpoint.descriptor().records_field
    }

    /// Wire pairs for one page request.
    pub(crate) fn paged(&self, page_size: usize, page_index: usize) -> Vec<(String, String)> {
        let mut pairs = self.pairs.clone();
        pairs.push(("pageSize".to_string(), page_size.to_string()));
        pairs.push(("pageIndex".to_string(), page_index.to_string()));
        pairs
    }
}
