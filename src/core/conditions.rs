use serde::{Deserialize, Serialize};

/// Weather categories mapped from WeatherAPI condition codes
///
/// The dashboard renders four icon families, so the provider's full code set
/// collapses into these buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherKind {
    /// Convert a WeatherAPI condition code to a category
    /// See: https://www.weatherapi.com/docs/weather_conditions.json
    pub fn from_code(code: i32) -> Self {
        match code {
            1000 => Self::Sunny,
            1003 | 1006 | 1009 => Self::Cloudy,
            1063 | 1180 | 1183 | 1186 | 1189 | 1192 | 1195 | 1240 | 1243 | 1246 => Self::Rainy,
            1066 | 1069 | 1072 | 1114 | 1117 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1237
            | 1249 | 1252 | 1255 | 1258 | 1261 | 1264 => Self::Snowy,
            _ => Self::Sunny, // Unknown codes default to sunny
        }
    }

    /// Stable lowercase label used in persisted documents and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }

    /// Icon name hint for clients
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::Cloudy => "cloud",
            Self::Rainy => "cloud_rain",
            Self::Snowy => "cloud_snow",
        }
    }
}
