use axum::{
    routing::{get, post},
    Router,
};

use crate::shared::AppState;
use crate::{league, predictions, reports};

/// Every HTTP route of the league API, bound to `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Futsal predictor is running" }))
        .route("/matchdays/next", get(league::get_next_matchday))
        .route("/matchdays/last", get(league::get_last_matchday))
        .route("/matchdays/:number/matches", get(league::get_matchday_matches))
        .route("/matchdays/:number/winners", get(league::get_matchday_winners))
        .route("/matchdays/:number/jackpot", get(league::get_matchday_jackpot))
        .route(
            "/matchdays/:number/distribution",
            get(reports::get_matchday_distribution),
        )
        .route(
            "/matchdays/:number/predictions",
            get(reports::get_matchday_predictions),
        )
        .route("/classification", get(league::get_classification))
        .route("/refresh", post(league::refresh))
        .route("/predictions", post(predictions::submit_predictions))
        .route("/users", get(predictions::list_users))
        .route("/stats/overview", get(reports::get_overview))
        .route("/stats/top-users", get(reports::get_top_users))
        .route("/stats/hit-ratio", get(reports::get_hit_ratio))
        .route("/stats/active-users", get(reports::get_active_users))
        .with_state(state)
}
