use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::city::slugify;
use crate::core::conditions::WeatherKind;

/// A user-pinned city as persisted in the dashboard collection
///
/// `id` is the slug derived from `name` and is the entity's natural key.
/// Field names stay camelCase on the wire so documents written by earlier
/// releases of the dashboard load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinnedCity {
    /// Slug identifier, unique within the collection
    #[serde(default)]
    pub id: String,

    /// City display name
    pub name: String,

    /// Condition category driving the card icon
    #[serde(default)]
    pub weather: WeatherKind,

    /// Current temperature, rounded °C
    #[serde(rename = "currentTemp", alias = "current", default)]
    pub current_temp: i32,

    /// Daily minimum, rounded °C
    #[serde(rename = "minTemp", default)]
    pub min_temp: i32,

    /// Daily maximum, rounded °C
    #[serde(rename = "maxTemp", default)]
    pub max_temp: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Verbatim condition text from the provider ("Partly cloudy", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Epoch milliseconds when the city was pinned; 0 until stamped
    #[serde(rename = "addedAt", default)]
    pub added_at: i64,
}

impl PinnedCity {
    /// Create a new entry with the slug id derived from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            weather: WeatherKind::default(),
            current_temp: 0,
            min_temp: 0,
            max_temp: 0,
            country: None,
            region: None,
            condition: None,
            added_at: 0,
        }
    }

    /// Backfill the slug id and timestamp where absent
    ///
    /// Entries from legacy documents may carry neither; the id must be
    /// re-derivable from the name for the migration to hold.
    pub fn normalize(&mut self) {
        if self.id.is_empty() {
            self.id = slugify(&self.name);
        }
        if self.added_at == 0 {
            self.added_at = Utc::now().timestamp_millis();
        }
    }

    /// Case-insensitive name equality, the collection's duplicate test
    pub fn same_name(&self, other_name: &str) -> bool {
        self.name.to_lowercase() == other_name.to_lowercase()
    }
}

impl From<crate::core::forecast::CityPreview> for PinnedCity {
    /// Pin the city a preview card describes
    fn from(preview: crate::core::forecast::CityPreview) -> Self {
        let mut city = PinnedCity::new(preview.name);
        city.weather = preview.weather;
        city.current_temp = preview.current;
        city.min_temp = preview.min_temp;
        city.max_temp = preview.max_temp;
        city.country = Some(preview.country).filter(|c| !c.is_empty());
        city.region = Some(preview.region).filter(|r| !r.is_empty());
        city.condition = Some(preview.condition).filter(|c| !c.is_empty());
        city
    }
}
