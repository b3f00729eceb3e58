use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::core::{ForecastResponse, RawCityRecord};
use crate::error::{Result, WeatherEngineError};
use crate::providers::WeatherProvider;

const BASE_URL: &str = "https://api.weatherapi.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// WeatherAPI.com provider
///
/// Thin client over the `search.json`, `current.json` and `forecast.json`
/// endpoints. The API key comes from configuration; it is embedded in query
/// strings and must never appear in logs.
pub struct WeatherApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApi {
    /// Create a new provider with the given API credential
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(WeatherEngineError::HttpRequest)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn provider_err(&self, message: impl Into<String>) -> WeatherEngineError {
        WeatherEngineError::Provider {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String, what: &str) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.provider_err(format!("{what} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(self.provider_err(format!("{what}: HTTP {}", response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| self.provider_err(format!("{what}: invalid JSON: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApi {
    async fn search_cities(&self, query: &str) -> Result<Vec<RawCityRecord>> {
        let url = format!(
            "{}/search.json?key={}&q={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        );

        // search.json returns a bare array, not a wrapped object
        let records: Vec<RawCityRecord> = self.get_json(url, "city search").await?;

        tracing::debug!(query, matches = records.len(), "city lookup returned");
        Ok(records)
    }

    async fn current(&self, location: &str) -> Result<ForecastResponse> {
        let url = format!(
            "{}/current.json?key={}&q={}&aqi=no",
            self.base_url,
            self.api_key,
            urlencoding::encode(location)
        );

        self.get_json(url, "current conditions").await
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<ForecastResponse> {
        let url = format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=yes&alerts=yes",
            self.base_url,
            self.api_key,
            urlencoding::encode(location),
            days
        );

        self.get_json(url, "forecast").await
    }

    fn name(&self) -> &str {
        "weatherapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_key() -> String {
        std::env::var("WEATHER_API_KEY").unwrap_or_default()
    }

    #[tokio::test]
    #[ignore] // Requires network access and WEATHER_API_KEY
    async fn test_search_cities() {
        let provider = WeatherApi::new(api_key()).unwrap();
        let records = provider.search_cities("london").await.unwrap();

        assert!(!records.is_empty());
        assert!(records.iter().any(|c| c.name == "London"));
    }

    #[tokio::test]
    #[ignore] // Requires network access and WEATHER_API_KEY
    async fn test_forecast() {
        let provider = WeatherApi::new(api_key()).unwrap();
        let data = provider.forecast("Paris", 5).await.unwrap();

        assert_eq!(data.location.name, "Paris");
        assert_eq!(data.forecast.forecastday.len(), 5);
    }

    #[tokio::test]
    async fn test_bad_base_url_maps_to_provider_error() {
        let provider = WeatherApi::new("k")
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let err = provider.search_cities("london").await.unwrap_err();

        match err {
            WeatherEngineError::Provider { provider, .. } => assert_eq!(provider, "weatherapi"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
