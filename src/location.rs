//! Location resolution via the ViaCEP postal code provider.
//!
//! One GET per lookup, no retries: a failed call is final for the request
//! that issued it.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{LookupError, Provider};
use crate::zipcode::Zipcode;

/// Municipality and state resolved for a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    /// Full state name when the two-letter code is known, the raw code otherwise
    pub region: String,
}

/// ViaCEP answers "no such code" with a success status and an `{"erro": true}`
/// body, so every field must default to empty rather than fail the decode.
/// An empty city is the not-found signal.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default, rename = "localidade")]
    city: String,
    #[serde(default, rename = "uf")]
    region: String,
}

/// Client for the postal code provider.
pub struct LocationClient {
    client: Client,
    base_url: String,
}

impl LocationClient {
    /// Create a new client from the shared configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "failed to create postal code HTTP client")?;

        Ok(Self {
            client,
            base_url: config.cep_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a validated postal code to its municipality and state.
    pub async fn resolve(&self, zipcode: &Zipcode) -> Result<Location, LookupError> {
        let url = format!("{}/{}/json/", self.base_url, zipcode);
        debug!(%url, "querying postal code provider");

        let response = self.client.get(&url).send().await.map_err(|err| {
            debug!(%err, "postal code request failed");
            LookupError::invalid_response(Provider::Location)
        })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "postal code provider returned non-success");
            return Err(LookupError::invalid_response(Provider::Location));
        }

        let body: ViaCepResponse = response.json().await.map_err(|err| {
            debug!(%err, "postal code response failed to decode");
            LookupError::decode_failure(Provider::Location)
        })?;

        if body.city.is_empty() {
            return Err(LookupError::NotFound);
        }

        Ok(Location {
            city: body.city,
            region: normalize_region(body.region),
        })
    }
}

/// Swap a two-letter state code for its full name; unknown codes pass
/// through unchanged so future codes keep working.
#[must_use]
pub fn normalize_region(region: String) -> String {
    match region_name(&region) {
        Some(name) => name.to_string(),
        None => region,
    }
}

/// Full names of all first-level administrative regions of Brazil.
fn region_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "AC" => "Acre",
        "AL" => "Alagoas",
        "AP" => "Amapá",
        "AM" => "Amazonas",
        "BA" => "Bahia",
        "CE" => "Ceará",
        "DF" => "Distrito Federal",
        "ES" => "Espírito Santo",
        "GO" => "Goiás",
        "MA" => "Maranhão",
        "MT" => "Mato Grosso",
        "MS" => "Mato Grosso do Sul",
        "MG" => "Minas Gerais",
        "PA" => "Pará",
        "PB" => "Paraíba",
        "PR" => "Paraná",
        "PE" => "Pernambuco",
        "PI" => "Piauí",
        "RJ" => "Rio de Janeiro",
        "RN" => "Rio Grande do Norte",
        "RS" => "Rio Grande do Sul",
        "RO" => "Rondônia",
        "RR" => "Roraima",
        "SC" => "Santa Catarina",
        "SP" => "São Paulo",
        "SE" => "Sergipe",
        "TO" => "Tocantins",
        _ => return None,
    };
    Some(name)
}
