use serde::{Deserialize, Serialize};

/// Unranked city match as returned by the lookup provider
///
/// Optional fields are modeled explicitly: the provider omits `region` for
/// top-level localities and occasionally `country` for odd records. Absence
/// is handled by the ranker, never treated as an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawCityRecord {
    /// Provider-assigned numeric ID
    #[serde(default)]
    pub id: i64,

    /// City name
    #[serde(default)]
    pub name: String,

    /// Administrative region (state/province), absent for some localities
    #[serde(default)]
    pub region: Option<String>,

    /// Country name
    #[serde(default)]
    pub country: Option<String>,

    /// Latitude
    #[serde(default)]
    pub lat: f64,

    /// Longitude
    #[serde(default)]
    pub lon: f64,

    /// Provider URL slug for the location
    #[serde(default)]
    pub url: String,
}

impl RawCityRecord {
    /// Create a new record with required fields
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            region: None,
            country: None,
            lat: 0.0,
            lon: 0.0,
            url: String::new(),
        }
    }

    /// Builder-style region setter (tests and fixtures)
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builder-style country setter (tests and fixtures)
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Ranked city match with a synthesized display label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityMatch {
    pub id: i64,
    pub name: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
    /// "{name}, {region}, {country}" with empty parts skipped
    pub display_name: String,
}

impl CityMatch {
    /// Build a match from a raw record, synthesizing the display label
    pub fn from_raw(raw: RawCityRecord) -> Self {
        let display_name = display_label(&raw.name, raw.region.as_deref(), raw.country.as_deref());
        Self {
            id: raw.id,
            name: raw.name,
            region: raw.region,
            country: raw.country,
            lat: raw.lat,
            lon: raw.lon,
            url: raw.url,
            display_name,
        }
    }
}

/// Join name, region and country into a display label, skipping parts that
/// are absent or empty
fn display_label(name: &str, region: Option<&str>, country: Option<&str>) -> String {
    let mut label = String::from(name);
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        label.push_str(", ");
        label.push_str(region);
    }
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        label.push_str(", ");
        label.push_str(country);
    }
    label
}

/// Derive a normalized slug from a city name
///
/// Lowercased, characters outside ASCII alphanumerics and whitespace are
/// stripped, whitespace runs collapse to single hyphens.
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}
