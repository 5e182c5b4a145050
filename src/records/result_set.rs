//! The ordered record sequence returned by every endpoint call.

use crate::error::CdssError;
use crate::query::endpoint::Endpoint;
use crate::records::frame::{column_names, records_to_dataframe};
use crate::spatial::filter::{filter_by_point, filter_by_polygon};
use crate::spatial::geometry::{LonLat, Polygon};
use polars::prelude::{DataFrame, IntoLazy, LazyFrame};

/// One JSON record as returned by the API, keyed by field name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// All records fetched for one endpoint call, in page order.
///
/// A `ResultSet` owns its records. Use [`ResultSet::to_dataframe`] for tabular
/// analysis, or iterate the raw JSON records directly.
///
/// # Examples
///
/// ```no_run
/// # use cdss::{Cdss, CdssError, LonLat};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CdssError> {
/// let cdss = Cdss::new()?;
/// let stations = cdss
///     .telemetry()
///     .stations()
///     .aoi(LonLat(-105.0, 39.7))
///     .radius(10.0)
///     .call()
///     .await?;
///
/// println!("{} stations", stations.len());
/// let df = stations.to_dataframe()?;
/// println!("{}", df.head(Some(5)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    endpoint: Endpoint,
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new(endpoint: Endpoint, records: Vec<Record>) -> Self {
        Self { endpoint, records }
    }

    /// The endpoint these records came from.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Union of field names across all records, in first-seen order.
    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.records)
    }

    /// Flattens the records into a `DataFrame`, one row per record.
    ///
    /// # Errors
    ///
    /// Returns [`CdssError::Frame`] if Polars fails to assemble the columns.
    pub fn to_dataframe(&self) -> Result<DataFrame, CdssError> {
        Ok(records_to_dataframe(&self.records)?)
    }

    /// Same as [`ResultSet::to_dataframe`], wrapped in a `LazyFrame`.
    pub fn lazy(&self) -> Result<LazyFrame, CdssError> {
        Ok(self.to_dataframe()?.lazy())
    }

    /// Keeps only records within `radius_miles` of `center`.
    ///
    /// # Errors
    ///
    /// Fails if the radius is not positive or the center is not a valid coordinate.
    pub fn within_radius(self, center: LonLat, radius_miles: f64) -> Result<Self, CdssError> {
        let records = filter_by_point(self.records, center, radius_miles)?;
        Ok(Self::new(self.endpoint, records))
    }

    /// Keeps only records inside `polygon`. Edge points count as inside.
    pub fn within_polygon(self, polygon: &Polygon) -> Self {
        let records = filter_by_polygon(self.records, polygon);
        Self::new(self.endpoint, records)
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structure(wdid: &str, longitude: f64, latitude: f64) -> Record {
        let mut record = Record::new();
        record.insert("wdid".into(), json!(wdid));
        record.insert("longitude".into(), json!(longitude));
        record.insert("latitude".into(), json!(latitude));
        record
    }

    fn sample() -> ResultSet {
        ResultSet::new(
            Endpoint::Structures,
            vec![
                structure("0100503", -104.5, 39.5),
                structure("0100504", -104.9, 39.1),
                structure("0200800", -102.0, 38.0),
            ],
        )
    }

    #[test]
    fn exposes_records_in_order() {
        let set = sample();
        assert_eq!(set.endpoint(), Endpoint::Structures);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        let wdids: Vec<&str> = set.iter().map(|r| r["wdid"].as_str().unwrap()).collect();
        assert_eq!(wdids, vec!["0100503", "0100504", "0200800"]);
        assert_eq!(set.column_names(), vec!["wdid", "longitude", "latitude"]);
    }

    #[test]
    fn converts_to_dataframe() {
        let df = sample().to_dataframe().unwrap();
        assert_eq!(df.shape(), (3, 3));
        let lazy = sample().lazy().unwrap().collect().unwrap();
        assert_eq!(lazy.shape(), (3, 3));
    }

    #[test]
    fn spatial_narrowing() {
        let square = Polygon::new(vec![
            LonLat(-105.0, 39.0),
            LonLat(-104.0, 39.0),
            LonLat(-104.0, 40.0),
            LonLat(-105.0, 40.0),
        ])
        .unwrap();
        let inside = sample().within_polygon(&square);
        assert_eq!(inside.len(), 2);

        let near = sample().within_radius(LonLat(-104.5, 39.5), 5.0).unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near.records()[0]["wdid"], json!("0100503"));

        assert!(sample().within_radius(LonLat(-104.5, 39.5), -1.0).is_err());
    }
}
