use anyhow::Result;
use commute_dashboard::{AppConfig, AppState, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    tracing::info!(
        version = commute_dashboard::VERSION,
        weather_key = !config.settings.weather_api_key.is_empty(),
        traffic_key = !config.settings.traffic_api_key.is_empty(),
        "Starting commute dashboard"
    );

    let state = AppState::from_config(config)?;
    web::run(state).await
}
