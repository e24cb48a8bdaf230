//! CEP weather lookup services.
//!
//! This library provides the core functionality for resolving a Brazilian
//! postal code (CEP) to its municipality, fetching the current temperature
//! there, and serving the reading in Celsius, Fahrenheit and Kelvin.

pub mod config;
pub mod error;
pub mod gateway;
pub mod location;
pub mod orchestrator;
pub mod temperature;
pub mod weather;
pub mod web;
pub mod zipcode;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::{LookupError, Provider};
pub use location::{Location, LocationClient};
pub use orchestrator::Orchestrator;
pub use temperature::WeatherReport;
pub use weather::WeatherClient;
pub use zipcode::Zipcode;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type of the lookup pipeline
pub type Result<T> = std::result::Result<T, LookupError>;
