use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{MatchDistribution, MatchPredictions, Overview, UserActivity, UserHits},
    service::ReportService,
    types::HitRatioResponse,
};
use crate::shared::{today, AppError, AppState};

fn service(state: &AppState) -> ReportService {
    ReportService::new(
        Arc::clone(&state.prediction_repository),
        Arc::clone(&state.league_repository),
    )
}

/// GET /stats/overview
#[instrument(name = "stats_overview", skip(state))]
pub async fn get_overview(State(state): State<AppState>) -> Result<Json<Overview>, AppError> {
    Ok(Json(service(&state).overview().await?))
}

/// GET /stats/top-users
#[instrument(name = "top_users", skip(state))]
pub async fn get_top_users(State(state): State<AppState>) -> Result<Json<Vec<UserHits>>, AppError> {
    let ranked = service(&state).top_users().await?;
    info!(users = ranked.len(), "Top users computed");
    Ok(Json(ranked))
}

/// GET /stats/hit-ratio
///
/// Hit ratios for the last matchday played; empty before the season starts
#[instrument(name = "hit_ratio", skip(state))]
pub async fn get_hit_ratio(
    State(state): State<AppState>,
) -> Result<Json<HitRatioResponse>, AppError> {
    let response = match service(&state).last_matchday_hit_ratios(today()).await? {
        Some((matchday, ratios)) => HitRatioResponse {
            matchday: Some(matchday),
            ratios,
        },
        None => HitRatioResponse::default(),
    };
    Ok(Json(response))
}

/// GET /stats/active-users
#[instrument(name = "active_users", skip(state))]
pub async fn get_active_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserActivity>>, AppError> {
    Ok(Json(service(&state).most_active_users().await?))
}

/// GET /matchdays/:number/distribution
#[instrument(name = "matchday_distribution", skip(state))]
pub async fn get_matchday_distribution(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<MatchDistribution>>, AppError> {
    Ok(Json(service(&state).matchday_distribution(&number).await?))
}

/// GET /matchdays/:number/predictions
#[instrument(name = "matchday_predictions", skip(state))]
pub async fn get_matchday_predictions(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<MatchPredictions>>, AppError> {
    Ok(Json(service(&state).matchday_predictions(&number).await?))
}
