use clap::{Parser, Subcommand};
use std::sync::Arc;

use weatherverse_engine::{
    CityStore, PinnedCity, SqliteBackend, WeatherApi, WeatherEngine, DEFAULT_FORECAST_DAYS,
};

#[derive(Parser)]
#[command(name = "weatherverse-cli")]
#[command(about = "Weatherverse Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = "weatherverse.db")]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for cities
    Search {
        /// Search query
        query: String,
    },

    /// Show a preview card for a city
    Preview {
        /// City name or location query
        city: String,
    },

    /// Show the multi-day forecast for a city
    Forecast {
        /// City name or location query
        city: String,

        /// Forecast days
        #[arg(short, long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u8,
    },

    /// Manage pinned cities
    Cities {
        #[command(subcommand)]
        action: CitiesCommands,
    },
}

#[derive(Subcommand)]
enum CitiesCommands {
    /// List pinned cities in dashboard order
    List,

    /// Pin a city (fetches a preview for its card data)
    Add {
        /// City name or location query
        city: String,
    },

    /// Unpin a city by slug
    Remove {
        /// City slug (e.g. new-york)
        slug: String,
    },

    /// Unpin everything
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let api_key = std::env::var("WEATHER_API_KEY")
        .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY must be set"))?;
    let provider = Arc::new(WeatherApi::new(api_key)?);
    let engine = WeatherEngine::new(provider);

    let backend = Arc::new(SqliteBackend::new(&cli.db).await?);
    let mut store = CityStore::new(backend);
    store.load().await?;

    match cli.command {
        Commands::Search { query } => {
            println!("🔍 Searching for: {}", query);

            let matches = engine.search_cities(&query).await?;

            if matches.is_empty() {
                println!("No matches");
            }
            for (i, city) in matches.iter().enumerate() {
                println!("   {}. {} ({:.2}, {:.2})", i + 1, city.display_name, city.lat, city.lon);
            }
        }

        Commands::Preview { city } => {
            let preview = engine.city_preview(&city).await?;

            println!("\n🌍 {}, {}", preview.name, preview.country);
            println!("   Now: {}°C ({})", preview.current, preview.condition);
            println!("   Range: {}°C – {}°C", preview.min_temp, preview.max_temp);
            println!("   Kind: {}", preview.weather.as_str());
        }

        Commands::Forecast { city, days } => {
            let data = engine.forecast(&city, days).await?;

            println!(
                "\n🌍 {}, {} ({})",
                data.location.name, data.location.country, data.location.tz_id
            );
            println!(
                "   Now: {:.0}°C, {}",
                data.current.temp_c, data.current.condition.text
            );

            for day in &data.forecast.forecastday {
                println!(
                    "   {}  {:>3.0}° / {:>3.0}°  {} (rain {}%)",
                    day.date,
                    day.day.maxtemp_c,
                    day.day.mintemp_c,
                    day.day.condition.text,
                    day.day.daily_chance_of_rain
                );
            }
        }

        Commands::Cities { action } => match action {
            CitiesCommands::List => {
                if store.is_empty() {
                    println!("No pinned cities");
                }
                for (i, city) in store.cities().iter().enumerate() {
                    println!(
                        "   {}. {} [{}]  {}°C ({} {}° / {}°)",
                        i + 1,
                        city.name,
                        city.id,
                        city.current_temp,
                        city.weather.as_str(),
                        city.max_temp,
                        city.min_temp
                    );
                }
            }

            CitiesCommands::Add { city } => {
                let preview = engine.city_preview(&city).await?;
                let pinned = PinnedCity::from(preview);
                let name = pinned.name.clone();

                if store.add(pinned).await? {
                    println!("📌 Pinned {}", name);
                } else {
                    println!("{} is already pinned", name);
                }
            }

            CitiesCommands::Remove { slug } => {
                if store.remove(&slug).await? {
                    println!("🗑 Removed {}", slug);
                } else {
                    println!("No pinned city with slug '{}'", slug);
                }
            }

            CitiesCommands::Clear => {
                store.clear().await?;
                println!("✅ All cities cleared");
            }
        },
    }

    Ok(())
}
