//! Area-of-interest handling: turns a point or polygon plus an optional radius
//! into the `latitude`/`longitude`/`radius` parameters the CDSS location search expects.

use crate::spatial::error::GeometryError;
use crate::spatial::geometry::{LonLat, Polygon};
use log::warn;

/// Radius used for point searches when none is given.
pub const DEFAULT_RADIUS_MILES: f64 = 20.0;
/// Largest radius the CDSS location search accepts.
pub const MAX_RADIUS_MILES: f64 = 150.0;

/// An area of interest used to spatially constrain stations or structures.
#[derive(Debug, Clone, PartialEq)]
pub enum Aoi {
    /// Search around a single coordinate.
    Point(LonLat),
    /// Search around the polygon, then keep only records inside it.
    Polygon(Polygon),
}

impl From<LonLat> for Aoi {
    fn from(point: LonLat) -> Self {
        Aoi::Point(point)
    }
}

impl From<Polygon> for Aoi {
    fn from(polygon: Polygon) -> Self {
        Aoi::Polygon(polygon)
    }
}

/// A validated spatial query, ready to be sent as request parameters.
///
/// The remote API only supports point + radius searches, so a polygon is sent as
/// its centroid plus a covering radius, and the polygon itself is kept as a
/// mask to apply to the fetched records.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialQuery {
    pub center: LonLat,
    pub radius_miles: f64,
    pub mask: Option<Polygon>,
}

impl SpatialQuery {
    /// Validates an area of interest and resolves the search radius.
    ///
    /// * Point: `radius` defaults to [`DEFAULT_RADIUS_MILES`].
    /// * Polygon: `radius` defaults to the smallest whole number of miles covering
    ///   every vertex from the centroid.
    ///
    /// In both cases the radius is clamped to [`MAX_RADIUS_MILES`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidRadius`] for a non-positive or non-finite radius
    /// and [`GeometryError::CoordinateOutOfRange`] for an invalid point.
    pub fn from_aoi(aoi: &Aoi, radius: Option<f64>) -> Result<Self, GeometryError> {
        if let Some(r) = radius {
            validate_radius(r)?;
        }

        match aoi {
            Aoi::Point(center) => {
                center.validate()?;
                Ok(Self {
                    center: *center,
                    radius_miles: clamp_radius(radius.unwrap_or(DEFAULT_RADIUS_MILES)),
                    mask: None,
                })
            }
            Aoi::Polygon(polygon) => {
                let center = polygon.centroid();
                let radius = match radius {
                    Some(r) => r,
                    None => polygon.max_distance_miles(&center).ceil().max(1.0),
                };
                Ok(Self {
                    center,
                    radius_miles: clamp_radius(radius),
                    mask: Some(polygon.clone()),
                })
            }
        }
    }

    /// Query pairs for the location search, in wire format.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("latitude".to_string(), format!("{:.5}", self.center.1)),
            ("longitude".to_string(), format!("{:.5}", self.center.0)),
            ("radius".to_string(), format_radius(self.radius_miles)),
            ("units".to_string(), "miles".to_string()),
        ]
    }
}

/// Checks that a radius is a positive, finite number of miles.
pub fn validate_radius(radius: f64) -> Result<(), GeometryError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidRadius(radius))
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if radius > MAX_RADIUS_MILES {
        warn!(
            "Search radius of {} miles exceeds the API maximum, using {} miles",
            radius, MAX_RADIUS_MILES
        );
        MAX_RADIUS_MILES
    } else {
        radius
    }
}

fn format_radius(radius: f64) -> String {
    if radius.fract() == 0.0 {
        format!("{radius:.0}")
    } else {
        radius.to_string()
    }
}
