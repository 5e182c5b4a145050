use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Coordinate ({longitude}, {latitude}) is not a valid WGS84 longitude/latitude pair")]
    CoordinateOutOfRange { longitude: f64, latitude: f64 },

    #[error("Polygon needs at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },

    #[error("Radius must be a positive number of miles, got {0}")]
    InvalidRadius(f64),
}
