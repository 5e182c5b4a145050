//! Geometry primitives used for spatial station searches: WGS84 points,
//! simple polygons with closed containment, and great-circle distances in miles.

use crate::spatial::error::GeometryError;
use geo::{coord, Area, BoundingRect, Centroid, Coord, Intersects, LineString, Point};
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A geographical coordinate as `(longitude, latitude)` in decimal degrees (WGS84).
///
/// The order matches the CDSS API and GeoJSON: longitude first.
///
/// # Examples
///
/// ```
/// use cdss::LonLat;
///
/// let denver = LonLat(-104.9903, 39.7392);
/// assert_eq!(denver.longitude(), -104.9903);
/// assert_eq!(denver.latitude(), 39.7392);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoordinateOutOfRange`] if either value is not finite,
    /// the longitude is outside `[-180, 180]` or the latitude outside `[-90, 90]`.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeometryError> {
        let point = Self(longitude, latitude);
        point.validate()?;
        Ok(point)
    }

    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }

    pub(crate) fn validate(&self) -> Result<(), GeometryError> {
        let valid = self.0.is_finite()
            && self.1.is_finite()
            && (-180.0..=180.0).contains(&self.0)
            && (-90.0..=90.0).contains(&self.1);
        if valid {
            Ok(())
        } else {
            Err(GeometryError::CoordinateOutOfRange {
                longitude: self.0,
                latitude: self.1,
            })
        }
    }

    /// Great-circle (haversine) distance to `other`, in statute miles.
    pub fn distance_miles(&self, other: &LonLat) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.1,
                longitude: self.0,
            },
            HaversineLocation {
                latitude: other.1,
                longitude: other.0,
            },
            Units::Miles,
        )
    }
}

/// A simple polygon described by its outer ring.
///
/// The ring is implicitly closed: the last vertex connects back to the first.
/// A trailing vertex equal to the first one is accepted and dropped, as are
/// consecutive repeats of the same vertex.
///
/// Containment is *closed*: points exactly on an edge or vertex count as inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<LonLat>,
    shape: geo::Polygon<f64>,
}

impl Polygon {
    /// Creates a polygon from an ordered ring of vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] if fewer than 3 distinct vertices remain
    /// after dropping repeats and an explicit closing vertex, and
    /// [`GeometryError::CoordinateOutOfRange`] if any vertex is not a valid WGS84 coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdss::{LonLat, Polygon};
    ///
    /// let square = Polygon::new(vec![
    ///     LonLat(-105.0, 39.0),
    ///     LonLat(-104.0, 39.0),
    ///     LonLat(-104.0, 40.0),
    ///     LonLat(-105.0, 40.0),
    /// ])
    /// .unwrap();
    /// assert!(square.contains(LonLat(-104.5, 39.5)));
    /// assert!(square.contains(LonLat(-104.5, 39.0))); // on an edge
    /// ```
    pub fn new(mut vertices: Vec<LonLat>) -> Result<Self, GeometryError> {
        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        let distinct = vertices
            .iter()
            .enumerate()
            .filter(|&(i, v)| !vertices[..i].contains(v))
            .count();
        if distinct < 3 {
            return Err(GeometryError::TooFewVertices { found: distinct });
        }
        for vertex in &vertices {
            vertex.validate()?;
        }

        let ring: Vec<Coord<f64>> = vertices.iter().map(|v| coord! { x: v.0, y: v.1 }).collect();
        let shape = geo::Polygon::new(LineString::new(ring), vec![]);
        Ok(Self { vertices, shape })
    }

    pub fn vertices(&self) -> &[LonLat] {
        &self.vertices
    }

    /// Axis-aligned bounding box as `([min_lon, min_lat], [max_lon, max_lat])`.
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        match self.shape.bounding_rect() {
            Some(rect) => (
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            ),
            None => {
                let first = self.vertices[0];
                ([first.0, first.1], [first.0, first.1])
            }
        }
    }

    /// Area-weighted centroid of the ring.
    ///
    /// Falls back to the mean of the vertices for degenerate (zero-area) rings.
    pub fn centroid(&self) -> LonLat {
        if self.shape.unsigned_area() > f64::EPSILON {
            if let Some(center) = self.shape.centroid() {
                return LonLat(center.x(), center.y());
            }
        }

        let count = self.vertices.len() as f64;
        let (sum_x, sum_y) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(x, y), v| (x + v.0, y + v.1));
        LonLat(sum_x / count, sum_y / count)
    }

    /// Largest great-circle distance (miles) from `center` to any vertex.
    pub fn max_distance_miles(&self, center: &LonLat) -> f64 {
        self.vertices
            .iter()
            .map(|v| OrderedFloat(center.distance_miles(v)))
            .max()
            .map(OrderedFloat::into_inner)
            .unwrap_or(0.0)
    }

    /// Closed point-in-polygon test: edge and vertex points are inside.
    ///
    /// Longitude/latitude are treated as planar coordinates.
    pub fn contains(&self, point: LonLat) -> bool {
        self.shape.intersects(&Point::new(point.0, point.1))
    }
}
