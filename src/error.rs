//! Error taxonomy for the lookup pipeline and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Upstream dependency a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// ViaCEP postal code lookup
    Location,
    /// WeatherAPI current conditions
    Weather,
}

impl Provider {
    /// Provider name as it appears in internal error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Provider::Location => "viacep",
            Provider::Weather => "weatherapi",
        }
    }
}

/// Typed outcome of a failed lookup.
///
/// Every code path through the pipeline terminates in exactly one of these
/// variants or a success. The variant messages are internal; clients only
/// ever see the fixed set produced by [`LookupError::status_and_message`].
#[derive(Error, Debug)]
pub enum LookupError {
    /// Caller-supplied postal code failed the local shape check
    #[error("invalid zipcode")]
    InvalidZipcode,

    /// Well-formed postal code with no corresponding municipality
    #[error("city not found for the given zipcode")]
    NotFound,

    /// A provider was unreachable, answered with a non-success status, or
    /// returned a body that could not be decoded
    #[error("{message}")]
    Upstream { provider: Provider, message: String },
}

impl LookupError {
    /// Create an upstream error with a custom message
    pub fn upstream<S: Into<String>>(provider: Provider, message: S) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    /// Upstream error for a transport failure or non-success status
    pub fn invalid_response(provider: Provider) -> Self {
        Self::upstream(provider, format!("invalid response from {}", provider.name()))
    }

    /// Upstream error for a success status carrying an undecodable body
    pub fn decode_failure(provider: Provider) -> Self {
        let what = match provider {
            Provider::Location => "location",
            Provider::Weather => "weather",
        };
        Self::upstream(provider, format!("failed to decode {what} response"))
    }

    /// Status code and client-facing message for this failure.
    ///
    /// Only the weather stage gets the dedicated 500 message; a failing
    /// postal code provider surfaces as a generic internal error.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            LookupError::InvalidZipcode => (StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode"),
            LookupError::NotFound => (StatusCode::NOT_FOUND, "can not find zipcode"),
            LookupError::Upstream {
                provider: Provider::Weather,
                ..
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to fetch weather data",
            ),
            LookupError::Upstream {
                provider: Provider::Location,
                ..
            } => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "lookup failed");
        } else {
            tracing::debug!(error = %self, "lookup rejected");
        }
        (status, Json(ErrorBody { message })).into_response()
    }
}
