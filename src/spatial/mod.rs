pub mod aoi;
pub mod error;
pub mod filter;
pub mod geometry;
