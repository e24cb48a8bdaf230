//! Configuration for the gateway and orchestrator services.
//!
//! Values come from defaults, an optional `config.toml` in the working
//! directory, and plain environment variables, in increasing precedence.
//! The environment variable names (`SERVER_PORT`, `CEP_API_URL`, ...) are the
//! documented interface. Configuration is loaded once in `main` and passed
//! into constructors; nothing reads it through a global.

use anyhow::{Context, Result, ensure};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Longest accepted timeout for either the outbound clients or the inbound
/// request deadline.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Process-wide, read-only settings for both services.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listen port of the orchestrator service
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Listen port of the gateway service
    #[serde(default = "default_gateway_port")]
    pub gateway_port: u16,
    /// Base URL the gateway forwards lookups to
    #[serde(default = "default_orchestrator_url")]
    pub orchestrator_url: String,
    /// Base URL of the postal code provider
    #[serde(default = "default_cep_api_url")]
    pub cep_api_url: String,
    /// URL of the weather provider's current conditions endpoint
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
    /// Weather provider API key; required for real lookups
    #[serde(default)]
    pub weather_api_key: String,
    /// Timeout applied to each outbound provider call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Deadline for one inbound request, in seconds
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_secs: u64,
}

// Default value functions
fn default_server_port() -> u16 {
    8181
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_orchestrator_url() -> String {
    "http://localhost:8181".to_string()
}

fn default_cep_api_url() -> String {
    "https://viacep.com.br/ws".to_string()
}

fn default_weather_api_url() -> String {
    "https://api.weatherapi.com/v1/current.json".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_handler_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: default_server_port(),
            gateway_port: default_gateway_port(),
            orchestrator_url: default_orchestrator_url(),
            cep_api_url: default_cep_api_url(),
            weather_api_url: default_weather_api_url(),
            weather_api_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            handler_timeout_secs: default_handler_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional `config.toml` and the environment.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .with_context(|| "failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("ORCHESTRATOR_URL", &self.orchestrator_url),
            ("CEP_API_URL", &self.cep_api_url),
            ("WEATHER_API_URL", &self.weather_api_url),
        ] {
            ensure!(
                url.starts_with("http://") || url.starts_with("https://"),
                "{name} must be an HTTP or HTTPS URL, got '{url}'"
            );
        }

        ensure!(
            (1..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs),
            "REQUEST_TIMEOUT_SECS must be between 1 and {MAX_TIMEOUT_SECS} seconds"
        );
        ensure!(
            (1..=MAX_TIMEOUT_SECS).contains(&self.handler_timeout_secs),
            "HANDLER_TIMEOUT_SECS must be between 1 and {MAX_TIMEOUT_SECS} seconds"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8181);
        assert_eq!(config.gateway_port, 8080);
        assert_eq!(config.cep_api_url, "https://viacep.com.br/ws");
        assert_eq!(
            config.weather_api_url,
            "https://api.weatherapi.com/v1/current.json"
        );
        assert!(config.weather_api_key.is_empty());
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.handler_timeout_secs, 30);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = AppConfig {
            cep_api_url: "ftp://viacep.com.br/ws".to_string(),
            ..AppConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("CEP_API_URL"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_timeout() {
        let config = AppConfig {
            handler_timeout_secs: 301,
            ..AppConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("HANDLER_TIMEOUT_SECS")
        );
    }
}
