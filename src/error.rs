use thiserror::Error;

/// Main error type for the weather engine
#[derive(Error, Debug)]
pub enum WeatherEngineError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// Pinned-city store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Input validation errors, rejected before any provider call
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Lookup misses (unknown slug, unknown location)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for WeatherEngineError {
    fn from(s: String) -> Self {
        WeatherEngineError::Other(s)
    }
}

impl From<&str> for WeatherEngineError {
    fn from(s: &str) -> Self {
        WeatherEngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WeatherEngineError>;
