pub mod error;
pub(crate) mod page;
pub mod paginator;
pub mod transport;
