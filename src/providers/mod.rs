pub mod weatherapi;

use async_trait::async_trait;

use crate::core::{ForecastResponse, RawCityRecord};
use crate::error::Result;

pub use weatherapi::WeatherApi;

/// Trait for weather data providers
///
/// One implementation talks to WeatherAPI.com; tests substitute an
/// in-process stub.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Look up cities matching a free-text query, unranked
    async fn search_cities(&self, query: &str) -> Result<Vec<RawCityRecord>>;

    /// Current conditions for a resolved location
    async fn current(&self, location: &str) -> Result<ForecastResponse>;

    /// Current conditions plus a multi-day forecast
    async fn forecast(&self, location: &str, days: u8) -> Result<ForecastResponse>;

    /// Get provider name
    fn name(&self) -> &str;
}
