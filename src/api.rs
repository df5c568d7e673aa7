//! OpenWeatherMap API client

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::PanelConfig;
use crate::report::{self, CurrentPayload, ForecastPayload};
use crate::state::{Units, WeatherReport};

/// Why a report could not be produced
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Please enter city name")]
    EmptyCity,
    /// The provider answered with an error status; holds its message
    #[error("{0}")]
    Provider(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Payload(String),
}

/// A response whose body parsed as JSON, whatever its status
#[derive(Debug)]
struct ProviderResponse {
    status: StatusCode,
    body: Value,
}

impl ProviderResponse {
    fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
    }
}

/// Client for the current-conditions and forecast endpoints
#[derive(Debug, Clone)]
pub struct WeatherApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl WeatherApi {
    pub fn new(config: &PanelConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if config.api_key.is_none() {
            warn!("no API key configured; the provider will reject requests");
        }

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            units: config.units,
        })
    }

    fn endpoint_url(&self, endpoint: &str, city: &str) -> String {
        format!(
            "{}/{}?q={}&units={}&appid={}",
            self.base_url,
            endpoint,
            urlencoding::encode(city),
            self.units.as_query(),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Fetch both endpoints concurrently and build the report.
    ///
    /// Nothing is returned until both requests have settled.
    pub async fn fetch_report(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        debug!(city, units = self.units.as_query(), "fetching weather");
        let current_url = self.endpoint_url("weather", city);
        let forecast_url = self.endpoint_url("forecast", city);

        let (current, forecast) =
            tokio::join!(self.get_json(&current_url), self.get_json(&forecast_url));
        let (current, forecast) = (current?, forecast?);

        if !current.status.is_success() || !forecast.status.is_success() {
            return Err(FetchError::Provider(provider_message(&current, &forecast)));
        }

        let current: CurrentPayload = decode(current.body)?;
        let forecast: ForecastPayload = decode(forecast.body)?;
        debug!(
            city,
            samples = forecast.list.len(),
            "weather payloads decoded"
        );

        report::build_report(&current, &forecast)
    }

    async fn get_json(&self, url: &str) -> Result<ProviderResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        let body =
            serde_json::from_str(&text).map_err(|e| FetchError::Payload(e.to_string()))?;
        Ok(ProviderResponse { status, body })
    }
}

/// Current-conditions message first, then forecast, then the status code.
fn provider_message(current: &ProviderResponse, forecast: &ProviderResponse) -> String {
    current
        .message()
        .or_else(|| forecast.message())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let status = if current.status.is_success() {
                forecast.status
            } else {
                current.status
            };
            format!("request failed with status {}", status.as_u16())
        })
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|e| FetchError::Payload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ProviderResponse {
        ProviderResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn test_provider_message_prefers_current() {
        let current = response(404, json!({"cod": "404", "message": "city not found"}));
        let forecast = response(401, json!({"cod": 401, "message": "Invalid API key"}));
        assert_eq!(provider_message(&current, &forecast), "city not found");
    }

    #[test]
    fn test_provider_message_falls_back_to_forecast() {
        let current = response(200, json!({"name": "Paris"}));
        let forecast = response(500, json!({"message": "internal error"}));
        assert_eq!(provider_message(&current, &forecast), "internal error");

        let current = response(200, json!({"message": ""}));
        let forecast = response(503, json!({}));
        assert_eq!(
            provider_message(&current, &forecast),
            "request failed with status 503"
        );
    }

    #[test]
    fn test_endpoint_url_encodes_city() {
        let config = PanelConfig {
            base_url: "http://localhost:1/".into(),
            api_key: Some("key".into()),
            ..Default::default()
        };
        let api = WeatherApi::new(&config).unwrap();
        assert_eq!(
            api.endpoint_url("weather", "New Delhi"),
            "http://localhost:1/weather?q=New%20Delhi&units=metric&appid=key"
        );
    }

    #[tokio::test]
    async fn test_empty_city_is_rejected_before_request() {
        let api = WeatherApi::new(&PanelConfig::default()).unwrap();
        assert_eq!(api.fetch_report("   ").await, Err(FetchError::EmptyCity));
    }
}
