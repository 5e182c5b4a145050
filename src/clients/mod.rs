pub mod admin_calls_client;
pub mod analysis_client;
pub mod climate_client;
pub mod groundwater_client;
pub mod reference_client;
pub mod structures_client;
pub mod surface_water_client;
pub mod telemetry_client;
pub mod water_rights_client;
