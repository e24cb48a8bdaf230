//! Sequencing of the lookup pipeline.

use crate::config::AppConfig;
use crate::error::LookupError;
use crate::location::LocationClient;
use crate::temperature::WeatherReport;
use crate::weather::WeatherClient;
use crate::zipcode::Zipcode;

/// Chains postal code validation, location resolution, weather resolution
/// and unit conversion into one outcome per request.
pub struct Orchestrator {
    location: LocationClient,
    weather: WeatherClient,
}

impl Orchestrator {
    /// Build both provider clients from the shared configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            location: LocationClient::new(config)?,
            weather: WeatherClient::new(config)?,
        })
    }

    /// Run the full pipeline for a raw zipcode string.
    ///
    /// The stages are strictly sequential: the weather provider is only
    /// consulted once the postal code provider has produced a city, and any
    /// stage's failure short-circuits the rest. Cancelling the request
    /// future drops whichever provider call is in flight.
    pub async fn lookup(&self, raw: &str) -> Result<WeatherReport, LookupError> {
        let zipcode: Zipcode = raw.parse()?;
        let location = self.location.resolve(&zipcode).await?;
        let celsius = self.weather.current_celsius(&location).await?;
        Ok(WeatherReport::from_celsius(celsius))
    }
}
