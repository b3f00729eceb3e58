pub mod sqlite;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::PinnedCity;
use crate::error::Result;

pub use sqlite::SqliteBackend;

/// Storage key the pinned-city document lives under
pub const STORAGE_KEY: &str = "weatherverse_pinned_cities";

/// Schema version tag written with every document
const STORAGE_VERSION: &str = "1.0";

/// Trait for persistence backends
///
/// The string key-value contract of browser local storage, made explicit so
/// the store's lifecycle is testable against any backend.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under a key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under a key, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; absent keys are a no-op
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Versioned on-disk shape of the pinned-city collection
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    version: String,
    cities: Vec<PinnedCity>,
    #[serde(rename = "lastUpdated", default)]
    last_updated: i64,
}

/// Payloads an older release may have written
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Versioned(StoredDocument),
    /// Pre-versioning format: a bare city array
    Legacy(Vec<PinnedCity>),
}

/// Ordered pinned-city collection over an injected persistence backend
///
/// Sequence order is application state (the dashboard's card order), so the
/// document persists the full ordered list. Every mutation flushes.
pub struct CityStore {
    backend: Arc<dyn StorageBackend>,
    cities: Vec<PinnedCity>,
}

impl CityStore {
    /// Create an empty store over a backend; call [`load`](Self::load) next
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            cities: Vec::new(),
        }
    }

    /// Load the collection from the backend
    ///
    /// Legacy bare-array payloads are migrated to the versioned shape and
    /// re-saved. Unreadable payloads load as empty rather than failing.
    pub async fn load(&mut self) -> Result<()> {
        let Some(raw) = self.backend.get(STORAGE_KEY).await? else {
            tracing::debug!("no saved cities found, starting empty");
            self.cities.clear();
            return Ok(());
        };

        match serde_json::from_str::<StoredPayload>(&raw) {
            Ok(StoredPayload::Versioned(doc)) => {
                self.cities = doc.cities;
                self.cities.iter_mut().for_each(PinnedCity::normalize);
                tracing::debug!(count = self.cities.len(), "loaded pinned cities");
            }
            Ok(StoredPayload::Legacy(cities)) => {
                tracing::info!("migrating pinned cities from legacy storage format");
                self.cities = cities;
                self.cities.iter_mut().for_each(PinnedCity::normalize);
                self.save().await?;
            }
            Err(e) => {
                tracing::warn!("unreadable pinned-city document, starting empty: {e}");
                self.cities.clear();
            }
        }

        Ok(())
    }

    /// Pin a city; a case-insensitive name duplicate is a no-op
    ///
    /// Returns whether the city was added.
    pub async fn add(&mut self, mut city: PinnedCity) -> Result<bool> {
        if self.cities.iter().any(|c| c.same_name(&city.name)) {
            tracing::debug!(name = %city.name, "city already pinned");
            return Ok(false);
        }

        city.normalize();
        tracing::info!(name = %city.name, id = %city.id, "pinning city");
        self.cities.push(city);
        self.save().await?;
        Ok(true)
    }

    /// Unpin the city with the given slug; returns whether one was removed
    pub async fn remove(&mut self, slug: &str) -> Result<bool> {
        let before = self.cities.len();
        self.cities.retain(|c| c.id != slug);

        if self.cities.len() == before {
            return Ok(false);
        }

        tracing::info!(slug, "unpinned city");
        self.save().await?;
        Ok(true)
    }

    /// Reorder the collection to the given slug sequence
    ///
    /// Unknown slugs are ignored; pinned cities missing from the sequence
    /// keep their relative order at the tail.
    pub async fn reorder(&mut self, slugs: &[String]) -> Result<()> {
        let mut remaining = std::mem::take(&mut self.cities);
        let mut ordered = Vec::with_capacity(remaining.len());

        for slug in slugs {
            if let Some(pos) = remaining.iter().position(|c| &c.id == slug) {
                ordered.push(remaining.remove(pos));
            }
        }
        ordered.extend(remaining);

        self.cities = ordered;
        self.save().await
    }

    /// Remove every pinned city and drop the backend key
    pub async fn clear(&mut self) -> Result<()> {
        self.cities.clear();
        self.backend.remove(STORAGE_KEY).await
    }

    /// Current ordered snapshot
    pub fn cities(&self) -> &[PinnedCity] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    async fn save(&self) -> Result<()> {
        let doc = StoredDocument {
            version: STORAGE_VERSION.to_string(),
            cities: self.cities.clone(),
            last_updated: Utc::now().timestamp_millis(),
        };

        let json = serde_json::to_string(&doc)?;
        self.backend.set(STORAGE_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WeatherKind;

    async fn memory_store() -> (CityStore, Arc<SqliteBackend>) {
        let backend = Arc::new(SqliteBackend::new(":memory:").await.unwrap());
        (CityStore::new(backend.clone()), backend)
    }

    fn city(name: &str) -> PinnedCity {
        let mut c = PinnedCity::new(name);
        c.weather = WeatherKind::Cloudy;
        c.current_temp = 10;
        c.min_temp = 5;
        c.max_temp = 15;
        c
    }

    #[tokio::test]
    async fn test_load_empty_backend() {
        let (mut store, _) = memory_store().await;
        store.load().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_reload() {
        let (mut store, backend) = memory_store().await;
        store.load().await.unwrap();

        assert!(store.add(city("London")).await.unwrap());
        assert!(store.add(city("Delhi")).await.unwrap());

        // A fresh store over the same backend sees the same sequence
        let mut reloaded = CityStore::new(backend);
        reloaded.load().await.unwrap();
        let names: Vec<&str> = reloaded.cities().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["London", "Delhi"]);
        assert!(reloaded.cities().iter().all(|c| c.added_at > 0));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_noop() {
        let (mut store, _) = memory_store().await;
        store.load().await.unwrap();

        assert!(store.add(city("London")).await.unwrap());
        assert!(!store.add(city("LONDON")).await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_by_slug() {
        let (mut store, _) = memory_store().await;
        store.load().await.unwrap();

        store.add(city("New York")).await.unwrap();
        assert!(store.remove("new-york").await.unwrap());
        assert!(!store.remove("new-york").await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reorder_persists() {
        let (mut store, backend) = memory_store().await;
        store.load().await.unwrap();

        store.add(city("A City")).await.unwrap();
        store.add(city("B City")).await.unwrap();
        store.add(city("C City")).await.unwrap();

        store
            .reorder(&["c-city".to_string(), "a-city".to_string()])
            .await
            .unwrap();

        // Unmentioned cities keep their relative order at the tail
        let names: Vec<&str> = store.cities().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["C City", "A City", "B City"]);

        let mut reloaded = CityStore::new(backend);
        reloaded.load().await.unwrap();
        let names: Vec<&str> = reloaded.cities().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["C City", "A City", "B City"]);
    }

    #[tokio::test]
    async fn test_reorder_ignores_unknown_slugs() {
        let (mut store, _) = memory_store().await;
        store.load().await.unwrap();

        store.add(city("A City")).await.unwrap();
        store
            .reorder(&["ghost".to_string(), "a-city".to_string()])
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_drops_backend_key() {
        let (mut store, backend) = memory_store().await;
        store.load().await.unwrap();

        store.add(city("London")).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.is_empty());
        assert!(backend.get(STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_array_migrates() {
        let (mut store, backend) = memory_store().await;

        // Pre-versioning document: bare array, no ids, legacy "current" key
        let legacy = r#"[{"name":"Old Town","weather":"rainy","current":9,"minTemp":4,"maxTemp":12}]"#;
        backend.set(STORAGE_KEY, legacy).await.unwrap();

        store.load().await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.cities()[0].id, "old-town");
        assert!(store.cities()[0].added_at > 0);

        // Migration re-saves in the versioned shape
        let saved = backend.get(STORAGE_KEY).await.unwrap().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(doc["version"], "1.0");
        assert_eq!(doc["cities"][0]["id"], "old-town");
        assert_eq!(doc["cities"][0]["currentTemp"], 9);
    }

    #[tokio::test]
    async fn test_unreadable_document_loads_empty() {
        let (mut store, backend) = memory_store().await;

        backend.set(STORAGE_KEY, "{not json").await.unwrap();
        store.load().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_ids_unique_within_collection() {
        let (mut store, _) = memory_store().await;
        store.load().await.unwrap();

        store.add(city("Springfield")).await.unwrap();
        store.add(city("springfield")).await.unwrap();

        let mut ids: Vec<&str> = store.cities().iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
    }
}
