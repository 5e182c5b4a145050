pub mod builder;
pub mod encode;
pub mod endpoint;
pub mod error;
pub mod params;
