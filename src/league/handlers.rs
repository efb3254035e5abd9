use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::{
    models::{ClassificationRecord, Matchday},
    service::{LeagueService, RefreshSummary},
    types::{JackpotResponse, MatchResponse, MatchdayResponse, WinnersResponse},
};
use crate::calendar::load_calendar;
use crate::shared::{today, AppError, AppState};

fn service(state: &AppState) -> LeagueService {
    LeagueService::new(
        Arc::clone(&state.league_repository),
        Arc::clone(&state.prediction_repository),
        state.config.jackpot,
    )
}

async fn match_responses(
    service: &LeagueService,
    matchday: &str,
) -> Result<Vec<MatchResponse>, AppError> {
    let logos = service.team_logos().await?;
    Ok(service
        .matchday_results(matchday)
        .await?
        .into_iter()
        .map(|result| MatchResponse::with_logos(result, &logos))
        .collect())
}

async fn with_matches(
    service: &LeagueService,
    matchday: Option<Matchday>,
) -> Result<Json<MatchdayResponse>, AppError> {
    let matchday =
        matchday.ok_or_else(|| AppError::NotFound("No matchday data found".to_string()))?;
    let matches = match_responses(service, &matchday.number).await?;

    Ok(Json(MatchdayResponse { matchday, matches }))
}

/// GET /matchdays/next
#[instrument(name = "next_matchday", skip(state))]
pub async fn get_next_matchday(
    State(state): State<AppState>,
) -> Result<Json<MatchdayResponse>, AppError> {
    let service = service(&state);
    let matchday = service.next_matchday(today()).await?;
    with_matches(&service, matchday).await
}

/// GET /matchdays/last
#[instrument(name = "last_matchday", skip(state))]
pub async fn get_last_matchday(
    State(state): State<AppState>,
) -> Result<Json<MatchdayResponse>, AppError> {
    let service = service(&state);
    let matchday = service.last_matchday(today()).await?;
    with_matches(&service, matchday).await
}

/// GET /matchdays/:number/matches
#[instrument(name = "matchday_matches", skip(state))]
pub async fn get_matchday_matches(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<MatchResponse>>, AppError> {
    let matches = match_responses(&service(&state), &number).await?;
    Ok(Json(matches))
}

/// GET /matchdays/:number/winners
#[instrument(name = "matchday_winners", skip(state))]
pub async fn get_matchday_winners(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<WinnersResponse>, AppError> {
    let usernames = service(&state).winners(&number).await?;
    Ok(Json(WinnersResponse {
        matchday: number,
        usernames,
    }))
}

/// GET /matchdays/:number/jackpot
#[instrument(name = "matchday_jackpot", skip(state))]
pub async fn get_matchday_jackpot(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<JackpotResponse>, AppError> {
    let accumulated = service(&state).jackpot_for_matchday(&number).await?;
    Ok(Json(JackpotResponse {
        matchday: number,
        accumulated,
    }))
}

/// GET /classification
#[instrument(name = "classification", skip(state))]
pub async fn get_classification(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassificationRecord>>, AppError> {
    let classification = service(&state).classification().await?;
    info!(teams = classification.len(), "Classification listed");
    Ok(Json(classification))
}

/// POST /refresh
///
/// Reloads the scraped calendar and recomputes standings, winners and jackpot
#[instrument(name = "refresh", skip(state))]
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshSummary>, AppError> {
    let calendar = load_calendar(&state.config.calendar_path)
        .await
        .map_err(|err| {
            error!(?err, "Failed to load calendar for refresh");
            AppError::from(err)
        })?;

    let summary = service(&state)
        .refresh(&calendar, today())
        .await
        .map_err(|err| {
            error!(?err, "Refresh failed");
            err
        })?;

    Ok(Json(summary))
}
