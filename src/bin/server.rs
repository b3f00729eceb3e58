use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weatherverse_engine::{
    CityMatch, CityPreview, CityStore, ForecastResponse, PinnedCity, SqliteBackend, WeatherApi,
    WeatherEngine, WeatherEngineError, DEFAULT_FORECAST_DAYS,
};

/// Freshness window intermediate caches may serve search results from
const SEARCH_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";

#[derive(Clone)]
struct AppState {
    engine: Arc<WeatherEngine>,
    store: Arc<Mutex<CityStore>>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "weatherverse_server=debug,weatherverse_engine=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = std::env::var("WEATHER_API_KEY")
        .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY must be set"))?;
    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "weatherverse.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Weatherverse Engine Server");
    tracing::info!("📦 Database: {}", db_path);
    tracing::info!("🔌 Port: {}", port);

    let provider = Arc::new(WeatherApi::new(api_key)?);
    let engine = Arc::new(WeatherEngine::new(provider));

    let backend = Arc::new(SqliteBackend::new(&db_path).await?);
    let mut store = CityStore::new(backend);
    store.load().await?;
    tracing::info!("📌 {} pinned cities loaded", store.len());

    let state = AppState {
        engine,
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/search-cities", get(search_cities_handler))
        .route("/v1/weather/:city", get(weather_handler))
        .route("/v1/weather-preview", get(weather_preview_handler))
        .route(
            "/v1/cities",
            get(list_cities_handler)
                .post(add_city_handler)
                .delete(clear_cities_handler),
        )
        .route("/v1/cities/order", put(reorder_cities_handler))
        .route("/v1/cities/:slug", delete(remove_city_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🌦 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: weatherverse_engine::VERSION.to_string(),
    })
}

async fn search_cities_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let start = Instant::now();

    let matches: Vec<CityMatch> = state.engine.search_cities(&params.q).await?;

    tracing::info!(
        "✅ '{}' → {} matches ({:.1}ms)",
        params.q,
        matches.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    // Let intermediate caches absorb repeat keystrokes
    Ok((
        [(header::CACHE_CONTROL, SEARCH_CACHE_CONTROL)],
        Json(matches),
    ))
}

async fn weather_handler(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ForecastResponse>, AppError> {
    let data = state.engine.forecast(&city, DEFAULT_FORECAST_DAYS).await?;
    Ok(Json(data))
}

async fn weather_preview_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<CityPreview>, AppError> {
    let preview = state.engine.city_preview(&params.q).await?;
    Ok(Json(preview))
}

async fn list_cities_handler(State(state): State<AppState>) -> Json<Vec<PinnedCity>> {
    let store = state.store.lock().await;
    Json(store.cities().to_vec())
}

async fn add_city_handler(
    State(state): State<AppState>,
    Json(city): Json<PinnedCity>,
) -> Result<Json<Vec<PinnedCity>>, AppError> {
    let mut store = state.store.lock().await;

    // Duplicate adds fall through to the unchanged list
    store.add(city).await?;
    Ok(Json(store.cities().to_vec()))
}

async fn remove_city_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<PinnedCity>>, AppError> {
    let mut store = state.store.lock().await;

    if !store.remove(&slug).await? {
        return Err(AppError(WeatherEngineError::NotFound(slug)));
    }
    Ok(Json(store.cities().to_vec()))
}

async fn reorder_cities_handler(
    State(state): State<AppState>,
    Json(slugs): Json<Vec<String>>,
) -> Result<Json<Vec<PinnedCity>>, AppError> {
    let mut store = state.store.lock().await;

    store.reorder(&slugs).await?;
    Ok(Json(store.cities().to_vec()))
}

async fn clear_cities_handler(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;

    store.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

// Error handling
struct AppError(WeatherEngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            WeatherEngineError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg),
            WeatherEngineError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("Not found: {}", what))
            }
            WeatherEngineError::Provider { provider, message } => (
                StatusCode::BAD_GATEWAY,
                format!("Provider '{}' error: {}", provider, message),
            ),
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<WeatherEngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
