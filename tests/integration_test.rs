use async_trait::async_trait;
use std::sync::Arc;

use weatherverse_engine::core::forecast::{
    ApiLocation, Condition, CurrentConditions, DaySummary, ForecastDay, ForecastDays,
};
use weatherverse_engine::{
    CityStore, ForecastResponse, PinnedCity, RawCityRecord, Result, SqliteBackend, WeatherEngine,
    WeatherEngineError, WeatherKind, WeatherProvider,
};

/// In-process provider with canned responses; the real provider is
/// network-bound and exercised by its own ignored tests.
struct StubProvider {
    fail: bool,
}

impl StubProvider {
    fn new() -> Self {
        Self { fail: false }
    }

    fn failing() -> Self {
        Self { fail: true }
    }

    fn err(&self) -> WeatherEngineError {
        WeatherEngineError::Provider {
            provider: "stub".to_string(),
            message: "upstream unavailable".to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<RawCityRecord>> {
        if self.fail {
            return Err(self.err());
        }

        // Provider order deliberately buries the well-known city
        let all = vec![
            RawCityRecord::new(10, "New Delhi")
                .with_region("Delhi")
                .with_country("India"),
            RawCityRecord::new(11, "Delhi Hills")
                .with_region("Ontario")
                .with_country("Canada"),
            RawCityRecord::new(12, "Delhi")
                .with_region("India")
                .with_country("India"),
        ];

        let q = query.to_lowercase();
        Ok(all
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&q))
            .collect())
    }

    async fn current(&self, location: &str) -> Result<ForecastResponse> {
        if self.fail {
            return Err(self.err());
        }

        Ok(ForecastResponse {
            location: ApiLocation {
                name: location.to_string(),
                region: "India".to_string(),
                country: "India".to_string(),
                ..Default::default()
            },
            current: CurrentConditions {
                temp_c: 30.4,
                condition: Condition {
                    text: "Patchy rain possible".to_string(),
                    code: 1063,
                    ..Default::default()
                },
                humidity: 70,
                ..Default::default()
            },
            forecast: ForecastDays::default(),
        })
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<ForecastResponse> {
        if self.fail {
            return Err(self.err());
        }

        let mut data = self.current(location).await?;
        data.forecast = ForecastDays {
            forecastday: (0..days)
                .map(|i| ForecastDay {
                    date: format!("2025-06-{:02}", i + 1),
                    day: DaySummary {
                        maxtemp_c: 35.0,
                        mintemp_c: 26.0,
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .collect(),
        };
        Ok(data)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[tokio::test]
async fn test_search_ranks_major_city_first() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));

    let matches = engine.search_cities("del").await.unwrap();

    let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Delhi", "New Delhi", "Delhi Hills"]);
    assert_eq!(matches[0].display_name, "Delhi, India, India");
}

#[tokio::test]
async fn test_search_no_matches_is_empty_not_error() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));

    let matches = engine.search_cities("zzz").await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));

    let err = engine.search_cities("").await.unwrap_err();
    assert!(matches!(err, WeatherEngineError::InvalidQuery(_)));
}

#[tokio::test]
async fn test_provider_failure_surfaces_unchanged() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::failing()));

    let err = engine.search_cities("del").await.unwrap_err();
    assert!(matches!(err, WeatherEngineError::Provider { .. }));
}

#[tokio::test]
async fn test_preview_classifies_condition() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));

    let preview = engine.city_preview("Delhi").await.unwrap();
    assert_eq!(preview.current, 30);
    assert_eq!(preview.min_temp, 25);
    assert_eq!(preview.max_temp, 35);
    assert_eq!(preview.weather, WeatherKind::Rainy);
    assert_eq!(preview.condition, "Patchy rain possible");
}

#[tokio::test]
async fn test_forecast_day_count() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));

    let data = engine.forecast("Delhi", 5).await.unwrap();
    assert_eq!(data.forecast.forecastday.len(), 5);
}

#[tokio::test]
async fn test_preview_to_pin_roundtrip() {
    let engine = WeatherEngine::new(Arc::new(StubProvider::new()));
    let backend = Arc::new(SqliteBackend::new(":memory:").await.unwrap());
    let mut store = CityStore::new(backend.clone());
    store.load().await.unwrap();

    let preview = engine.city_preview("Delhi").await.unwrap();
    assert!(store.add(PinnedCity::from(preview.clone())).await.unwrap());

    // Pinning the same city again is a no-op
    assert!(!store.add(PinnedCity::from(preview)).await.unwrap());
    assert_eq!(store.len(), 1);

    // The persisted entry survives a fresh store over the same backend
    let mut reloaded = CityStore::new(backend);
    reloaded.load().await.unwrap();
    let city = &reloaded.cities()[0];
    assert_eq!(city.id, "delhi");
    assert_eq!(city.current_temp, 30);
    assert_eq!(city.weather, WeatherKind::Rainy);
    assert_eq!(city.condition.as_deref(), Some("Patchy rain possible"));
}
