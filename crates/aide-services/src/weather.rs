//! Current-weather lookup against an OpenWeatherMap-compatible endpoint.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;

use aide_core::WeatherReport;

use crate::error::WeatherError;

/// A source of current weather observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Look up the current weather for `location`.
    ///
    /// `credential` is the weather API key; `None` yields
    /// [`WeatherError::MissingCredential`] without touching the network.
    async fn fetch_weather(
        &self,
        location: &str,
        credential: Option<&str>,
    ) -> Result<WeatherReport, WeatherError>;
}

/// HTTP client for the OpenWeatherMap "current weather" API.
pub struct OpenWeatherClient {
    http: Client,
    endpoint: String,
}

impl OpenWeatherClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(
        &self,
        location: &str,
        credential: Option<&str>,
    ) -> Result<WeatherReport, WeatherError> {
        let Some(api_key) = credential else {
            return Err(WeatherError::MissingCredential);
        };

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Weather request failed");
                WeatherError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), %message, "Weather provider error");
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;
        let parsed: OwmResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
        parsed.into_report()
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    #[serde(default)]
    sys: Option<OwmSys>,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OwmResponse {
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| WeatherError::Malformed("no weather conditions".to_string()))?;
        let country = self.sys.and_then(|s| s.country).unwrap_or_default();
        let observed_at: DateTime<Utc> = Utc
            .timestamp_opt(self.dt, 0)
            .single()
            .ok_or_else(|| WeatherError::Malformed(format!("invalid timestamp {}", self.dt)))?;

        Ok(WeatherReport {
            location: format!("{}, {}", self.name, country),
            temperature_c: self.main.temp.round() as i64,
            feels_like_c: self.main.feels_like.round() as i64,
            description,
            humidity_pct: self.main.humidity.round() as i64,
            wind_speed: self.wind.speed,
            observed_at,
        })
    }
}
