//! Current temperature via the WeatherAPI provider.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{LookupError, Provider};
use crate::location::Location;

/// Only the current Celsius reading is of interest; everything else in the
/// provider's response is ignored.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Client for the weather provider.
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new client from the shared configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "failed to create weather HTTP client")?;

        Ok(Self {
            client,
            base_url: config.weather_api_url.clone(),
            api_key: config.weather_api_key.clone(),
        })
    }

    /// Fetch the current Celsius temperature for a resolved location.
    pub async fn current_celsius(&self, location: &Location) -> Result<f64, LookupError> {
        let query = location_query(location);
        let url = format!(
            "{}?key={}&q={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(&query)
        );
        // The key stays out of the logs
        debug!(%query, "querying weather provider");

        let response = self.client.get(&url).send().await.map_err(|err| {
            debug!(%err, "weather request failed");
            LookupError::invalid_response(Provider::Weather)
        })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "weather provider returned non-success");
            return Err(LookupError::invalid_response(Provider::Weather));
        }

        let body: WeatherResponse = response.json().await.map_err(|err| {
            debug!(%err, "weather response failed to decode");
            LookupError::decode_failure(Provider::Weather)
        })?;

        Ok(body.current.temp_c)
    }
}

/// Free-text location query in the provider's `country:…,region:…,name:…`
/// format. This is an external wire format; its shape is held stable.
fn location_query(location: &Location) -> String {
    format!(
        "country:Brazil,region:{},name:{}",
        location.region, location.city
    )
}
