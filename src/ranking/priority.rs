use crate::core::{CityMatch, RawCityRecord};
use crate::ranking::{CityRanker, MAX_RESULTS};

/// Countries whose cities rank ahead of same-named localities elsewhere
const PRIORITY_COUNTRIES: &[&str] = &[
    "India",
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "Germany",
    "France",
    "Japan",
    "China",
    "Brazil",
    "Mexico",
    "Italy",
    "Spain",
    "Netherlands",
    "Switzerland",
    "Sweden",
    "Norway",
    "Denmark",
];

/// Major cities that win when a query matches several places with the same name
const MAJOR_CITIES: &[&str] = &[
    "Delhi",
    "Mumbai",
    "Kolkata",
    "Chennai",
    "Bangalore",
    "Hyderabad",
    "Pune",
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "London",
    "Manchester",
    "Birmingham",
    "Liverpool",
    "Leeds",
    "Toronto",
    "Montreal",
    "Vancouver",
    "Calgary",
    "Edmonton",
    "Sydney",
    "Melbourne",
    "Brisbane",
    "Perth",
    "Adelaide",
];

/// Heuristic priority ranker
///
/// The lookup provider returns matches in an order that does not reflect
/// user intent: obscure same-named villages outrank well-known cities. This
/// ranker compensates with cheap, explainable allow-list signals. Weights
/// are tuning constants; ordering correctness only depends on the
/// deterministic sort below.
pub struct PriorityRanker;

impl PriorityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Integer priority score, the sum of independent signals
    pub fn priority(city: &RawCityRecord) -> i32 {
        let mut priority = 0;

        // Major cities win outright
        if MAJOR_CITIES.contains(&city.name.as_str()) {
            priority += 100;
        }

        if city
            .country
            .as_deref()
            .is_some_and(|c| PRIORITY_COUNTRIES.contains(&c))
        {
            priority += 50;
        }

        // Capital / top-level match: region mirrors the country or is absent
        match city.region.as_deref() {
            None | Some("") => priority += 25,
            Some(region) if Some(region) == city.country.as_deref() => priority += 25,
            _ => {}
        }

        // Well-disambiguated locality: a region distinct from the city name
        if let Some(region) = city.region.as_deref() {
            if !region.is_empty() && region != city.name {
                priority += 10;
            }
        }

        priority
    }
}

impl Default for PriorityRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl CityRanker for PriorityRanker {
    fn rank(&self, query: &str, candidates: &[RawCityRecord]) -> Vec<CityMatch> {
        let mut scored: Vec<(i32, &RawCityRecord)> = candidates
            .iter()
            .map(|city| (Self::priority(city), city))
            .collect();

        // Highest priority first; ties fall back to name order so equal
        // candidates come out in a reproducible sequence
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name.cmp(&b.1.name)));

        tracing::debug!(
            query,
            candidates = candidates.len(),
            returned = scored.len().min(MAX_RESULTS),
            "ranked city matches"
        );

        scored
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(_, city)| CityMatch::from_raw(city.clone()))
            .collect()
    }

    fn name(&self) -> &str {
        "priority"
    }
}
