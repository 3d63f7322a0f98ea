//! OpenWeatherMap client.
//!
//! One invocation issues one HTTP GET and settles into exactly one outcome:
//! `Ok(WeatherSnapshot)` or `Err(FetchError)`. The client performs no
//! retries, no de-duplication and no cancellation of earlier requests; the
//! only hardening over the bare call is a per-request timeout, which still
//! surfaces as a regular transport failure.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::state::WeatherSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch settled without a snapshot. The `Display` output is the
/// user-facing message, rendered verbatim by the view layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No API key configured; checked before any network traffic.
    #[error("API key is missing or not loaded correctly")]
    MissingApiKey,
    /// The provider answered with an error status.
    #[error("{message}")]
    Provider { message: String },
    /// No response at all (DNS, connect, timeout, malformed body).
    #[error("{message}")]
    Transport { message: String },
}

impl FetchError {
    fn transport(err: reqwest::Error) -> Self {
        let message = err.to_string();
        let message = if message.is_empty() {
            "Network error or API unreachable".to_string()
        } else {
            message
        };
        Self::Transport { message }
    }
}

/// Error body the provider returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

impl CurrentWeather {
    fn into_snapshot(self) -> WeatherSnapshot {
        let (condition_code, condition_description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.icon, w.description))
            .unwrap_or_else(|| (String::new(), "Unknown".to_string()));

        WeatherSnapshot {
            city_name: self.name,
            temperature_celsius: self.main.temp,
            condition_code,
            condition_description,
            humidity_percent: self.main.humidity,
            wind_speed_mps: self.wind.speed,
        }
    }
}

/// Client for the current-weather-by-city-name endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (tests use a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current conditions for a city. The caller trims the name; this
    /// method does not enforce non-emptiness.
    pub async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(FetchError::transport)?;

        if response.status().is_success() {
            let payload: CurrentWeather =
                response.json().await.map_err(FetchError::transport)?;
            Ok(payload.into_snapshot())
        } else {
            let message = response
                .json::<ProviderError>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "City not found or API error".to_string());
            Err(FetchError::Provider { message })
        }
    }
}
