use serde::{Deserialize, Serialize};

use crate::core::conditions::WeatherKind;

/// Weather payload for a resolved location
///
/// Mirrors the subset of the upstream current/forecast response the
/// dashboard consumes; unknown upstream fields are ignored and missing ones
/// default, so provider-side schema additions never break deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub location: ApiLocation,

    #[serde(default)]
    pub current: CurrentConditions,

    /// Absent on current-conditions-only responses
    #[serde(default)]
    pub forecast: ForecastDays,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tz_id: String,
    #[serde(default)]
    pub localtime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CurrentConditions {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub temp_c: f64,
    #[serde(default)]
    pub is_day: i32,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: String,
    #[serde(default)]
    pub pressure_mb: f64,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub humidity: i32,
    #[serde(default)]
    pub cloud: i32,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub vis_km: f64,
    #[serde(default)]
    pub uv: f64,
    #[serde(default)]
    pub gust_kph: f64,
}

/// Provider condition tag: human text plus the numeric code the icon
/// mapping keys on
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Condition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForecastDays {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForecastDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub day: DaySummary,
    #[serde(default)]
    pub astro: Astro,
    #[serde(default)]
    pub hour: Vec<HourForecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DaySummary {
    #[serde(default)]
    pub maxtemp_c: f64,
    #[serde(default)]
    pub mintemp_c: f64,
    #[serde(default)]
    pub avgtemp_c: f64,
    #[serde(default)]
    pub maxwind_kph: f64,
    #[serde(default)]
    pub totalprecip_mm: f64,
    #[serde(default)]
    pub avghumidity: f64,
    #[serde(default)]
    pub daily_chance_of_rain: i32,
    #[serde(default)]
    pub daily_chance_of_snow: i32,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub uv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Astro {
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    #[serde(default)]
    pub moonrise: String,
    #[serde(default)]
    pub moonset: String,
    #[serde(default)]
    pub moon_phase: String,
    #[serde(default)]
    pub moon_illumination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HourForecast {
    #[serde(default)]
    pub time_epoch: i64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub temp_c: f64,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub chance_of_rain: i32,
    #[serde(default)]
    pub chance_of_snow: i32,
}

/// Preview card synthesized from current conditions
///
/// Min/max are a ±5 °C approximation around the current reading: previews
/// exist to be answerable from a single current-conditions call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityPreview {
    pub name: String,
    pub country: String,
    pub region: String,
    /// Current temperature, rounded °C
    pub current: i32,
    #[serde(rename = "minTemp")]
    pub min_temp: i32,
    #[serde(rename = "maxTemp")]
    pub max_temp: i32,
    pub weather: WeatherKind,
    pub condition: String,
}

impl CityPreview {
    /// Build a preview card from a current-conditions response
    pub fn from_current(data: &ForecastResponse) -> Self {
        let current = data.current.temp_c.round() as i32;
        Self {
            name: data.location.name.clone(),
            country: data.location.country.clone(),
            region: data.location.region.clone(),
            current,
            min_temp: current - 5,
            max_temp: current + 5,
            weather: WeatherKind::from_code(data.current.condition.code),
            condition: data.current.condition.text.clone(),
        }
    }
}
