pub mod city;
pub mod conditions;
pub mod forecast;
pub mod pinned_city;

pub use city::{slugify, CityMatch, RawCityRecord};
pub use conditions::WeatherKind;
pub use forecast::{CityPreview, ForecastResponse};
pub use pinned_city::PinnedCity;
