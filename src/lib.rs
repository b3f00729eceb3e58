//! # Weatherverse Engine
//!
//! Server-side engine for a weather dashboard:
//! - City search with priority ranking over a lookup provider
//! - Current-conditions and multi-day forecast proxying
//! - Preview-card synthesis with condition-code classification
//! - Versioned, ordered pinned-city store over pluggable persistence
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weatherverse_engine::{WeatherApi, WeatherEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(WeatherApi::new(std::env::var("WEATHER_API_KEY")?)?);
//!     let engine = WeatherEngine::new(provider);
//!
//!     for city in engine.search_cities("del").await? {
//!         println!("{}", city.display_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod providers;
pub mod ranking;
pub mod store;

// Re-export primary types
pub use crate::core::{
    CityMatch, CityPreview, ForecastResponse, PinnedCity, RawCityRecord, WeatherKind,
};
pub use engine::{WeatherEngine, DEFAULT_FORECAST_DAYS};
pub use error::{Result, WeatherEngineError};
pub use providers::{WeatherApi, WeatherProvider};
pub use ranking::{CityRanker, PriorityRanker, MAX_RESULTS};
pub use store::{CityStore, SqliteBackend, StorageBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
