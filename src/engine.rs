use std::sync::Arc;

use crate::core::{CityMatch, CityPreview, ForecastResponse};
use crate::error::{Result, WeatherEngineError};
use crate::providers::WeatherProvider;
use crate::ranking::{CityRanker, PriorityRanker};

/// Forecast horizon the dashboard requests
pub const DEFAULT_FORECAST_DAYS: u8 = 5;

/// Main weather engine orchestrator
///
/// Validates queries, fetches from the provider and applies the ranker.
/// Holds no mutable state; one instance serves concurrent callers.
pub struct WeatherEngine {
    provider: Arc<dyn WeatherProvider>,
    ranker: Arc<dyn CityRanker>,
}

impl WeatherEngine {
    /// Create an engine over a provider with the default priority ranker
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            ranker: Arc::new(PriorityRanker::new()),
        }
    }

    /// Swap in a different ranking strategy
    pub fn with_ranker(mut self, ranker: Arc<dyn CityRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Search for cities and return ranked, deduplicated matches
    ///
    /// Queries shorter than 1 character are rejected before any provider
    /// call. An empty provider result is an empty match list, not an error.
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CityMatch>> {
        if query.is_empty() {
            return Err(WeatherEngineError::InvalidQuery(
                "query must be at least 1 character".to_string(),
            ));
        }

        let raw = match self.provider.search_cities(query).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), query, "city search failed: {e}");
                return Err(e);
            }
        };

        Ok(self.ranker.rank(query, &raw))
    }

    /// Build a preview card from current conditions for a location query
    pub async fn city_preview(&self, query: &str) -> Result<CityPreview> {
        if query.is_empty() {
            return Err(WeatherEngineError::InvalidQuery(
                "query parameter is required".to_string(),
            ));
        }

        let data = self.provider.current(query).await?;
        Ok(CityPreview::from_current(&data))
    }

    /// Proxy the multi-day forecast for a resolved location
    pub async fn forecast(&self, location: &str, days: u8) -> Result<ForecastResponse> {
        if location.is_empty() {
            return Err(WeatherEngineError::InvalidQuery(
                "location is required".to_string(),
            ));
        }

        self.provider.forecast(location, days).await
    }

    /// Name of the active ranking strategy (logging, stats)
    pub fn ranker_name(&self) -> &str {
        self.ranker.name()
    }
}
