//! Client-side spatial filtering of already-fetched records.
//!
//! Both filters are pure: they take ownership of the records, keep the matching
//! ones in their original order and never perform I/O. Records without a usable
//! `longitude`/`latitude` pair are dropped.

use crate::records::result_set::Record;
use crate::spatial::aoi::validate_radius;
use crate::spatial::error::GeometryError;
use crate::spatial::geometry::{LonLat, Polygon};
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};
use serde_json::Value;

const LONGITUDE_FIELD: &str = "longitude";
const LATITUDE_FIELD: &str = "latitude";

/// Slack added to the polygon's bounding box so edge points survive the R-tree pre-filter.
const ENVELOPE_SLACK: f64 = 1e-9;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Reads the record's `longitude`/`latitude` fields.
///
/// Accepts JSON numbers and numeric strings. Returns `None` when either field is
/// missing, null, non-numeric or outside the valid WGS84 range.
pub fn record_location(record: &Record) -> Option<LonLat> {
    let longitude = coordinate(record.get(LONGITUDE_FIELD)?)?;
    let latitude = coordinate(record.get(LATITUDE_FIELD)?)?;
    let point = LonLat(longitude, latitude);
    point.validate().ok().map(|_| point)
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keeps records within `radius_miles` (great-circle distance, inclusive) of `center`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidRadius`] if the radius is not a positive finite number,
/// or [`GeometryError::CoordinateOutOfRange`] if the center is invalid.
pub fn filter_by_point(
    records: Vec<Record>,
    center: LonLat,
    radius_miles: f64,
) -> Result<Vec<Record>, GeometryError> {
    validate_radius(radius_miles)?;
    center.validate()?;

    Ok(records
        .into_iter()
        .filter(|record| {
            record_location(record)
                .is_some_and(|location| center.distance_miles(&location) <= radius_miles)
        })
        .collect())
}

/// Keeps records whose location lies inside `polygon` (closed: edges count as inside).
pub fn filter_by_polygon(records: Vec<Record>, polygon: &Polygon) -> Vec<Record> {
    let located: Vec<IndexedPoint> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record_location(record).map(|p| GeomWithData::new([p.0, p.1], index))
        })
        .collect();

    let (min, max) = polygon.bounding_box();
    let envelope = AABB::from_corners(
        [min[0] - ENVELOPE_SLACK, min[1] - ENVELOPE_SLACK],
        [max[0] + ENVELOPE_SLACK, max[1] + ENVELOPE_SLACK],
    );

    let tree = RTree::bulk_load(located);
    let mut keep: Vec<usize> = tree
        .locate_in_envelope(&envelope)
        .filter(|candidate| {
            let [lon, lat] = *candidate.geom();
            polygon.contains(LonLat(lon, lat))
        })
        .map(|candidate| candidate.data)
        .collect();
    keep.sort_unstable();

    let mut keep = keep.into_iter().peekable();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if keep.peek() == Some(&index) {
                keep.next();
                Some(record)
            } else {
                None
            }
        })
        .collect()
}
