use futsal_predictor::{
    config::AppConfig,
    league::repository::{InMemoryLeagueRepository, LeagueRepository, PostgresLeagueRepository},
    predictions::repository::{
        InMemoryPredictionRepository, PostgresPredictionRepository, PredictionRepository,
    },
    routes, AppState,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "futsal_predictor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting futsal predictor");

    let config = AppConfig::from_env()?;

    let (league_repository, prediction_repository): (
        Arc<dyn LeagueRepository>,
        Arc<dyn PredictionRepository>,
    ) = match &config.database {
        Some(database) => {
            let pool = database.connect().await?;
            (
                Arc::new(PostgresLeagueRepository::new(pool.clone())),
                Arc::new(PostgresPredictionRepository::new(pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set, data will only live in memory");
            (
                Arc::new(InMemoryLeagueRepository::new()),
                Arc::new(InMemoryPredictionRepository::new()),
            )
        }
    };

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(league_repository, prediction_repository, config);

    let app = routes::app(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
