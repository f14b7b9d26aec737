pub mod config;
pub mod crm;
pub mod error;
pub mod reports;
pub mod telemetry;
