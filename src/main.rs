use crate::api::handlers::AppState;
use crate::clients::recommendations::RecommendationClient;
use crate::config::Config;
use crate::services::recommendation::RecommendationService;

mod api;
mod clients;
mod config;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let recommendation_client = RecommendationClient::new(&config)?;
    let recommendation_service = RecommendationService::new(recommendation_client);

    let state = AppState {
        config: config.clone(),
        recommendation_service,
    };

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = %config.port, upstream = %config.recommendation_api_url, "server.listening");
    axum::serve(listener, app).await?;
    Ok(())
}
