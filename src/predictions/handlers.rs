use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::PredictionService,
    types::{SubmitPredictionsRequest, SubmitPredictionsResponse, UsersResponse},
};
use crate::shared::{today, AppError, AppState};

fn service(state: &AppState) -> PredictionService {
    PredictionService::new(
        Arc::clone(&state.prediction_repository),
        Arc::clone(&state.league_repository),
    )
}

/// POST /predictions
#[instrument(
    name = "submit_predictions",
    skip(state, request),
    fields(username = %request.username)
)]
pub async fn submit_predictions(
    State(state): State<AppState>,
    Json(request): Json<SubmitPredictionsRequest>,
) -> Result<Json<SubmitPredictionsResponse>, AppError> {
    let response = service(&state).submit(request, today()).await?;
    Ok(Json(response))
}

/// GET /users
#[instrument(name = "list_users", skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, AppError> {
    let usernames = service(&state).list_usernames().await?;
    info!(user_count = usernames.len(), "Users listed");
    Ok(Json(UsersResponse { usernames }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::models::{MatchResult, Matchday};
    use crate::league::repository::{InMemoryLeagueRepository, LeagueRepository};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use chrono::NaiveDate;
    use tower::ServiceExt; // for `oneshot`

    async fn app() -> Router {
        let league = Arc::new(InMemoryLeagueRepository::new());
        league
            .upsert_matchdays(&[Matchday::new(
                "3",
                NaiveDate::from_ymd_opt(2025, 10, 18).unwrap(),
            )])
            .await
            .unwrap();
        league
            .replace_results(&[MatchResult {
                matchday: "3".into(),
                home_team: "Sala Ripollet".into(),
                away_team: "CFS Montcada".into(),
                home_goals: None,
                away_goals: None,
            }])
            .await
            .unwrap();

        let state = AppStateBuilder::new().with_league_repository(league).build();
        Router::new()
            .route("/predictions", post(submit_predictions))
            .route("/users", get(list_users))
            .with_state(state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predictions")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_list_users() {
        let app = app().await;

        let body = r#"{"username": "anna", "matchday": "3", "picks": [
            {"home_team": "Sala Ripollet", "away_team": "CFS Montcada", "pick": "X"}
        ]}"#;
        let response = app.clone().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let saved: SubmitPredictionsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(saved.saved, 1);

        let request = Request::builder().uri("/users").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let users: UsersResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(users.usernames, vec!["anna"]);
    }

    #[tokio::test]
    async fn test_submit_incomplete_is_bad_request() {
        let app = app().await;

        let body = r#"{"username": "anna", "matchday": "3", "picks": []}"#;
        let response = app.oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_invalid_pick_is_rejected() {
        let app = app().await;

        let body = r#"{"username": "anna", "matchday": "3", "picks": [
            {"home_team": "Sala Ripollet", "away_team": "CFS Montcada", "pick": "3"}
        ]}"#;
        let response = app.oneshot(post_json(body)).await.unwrap();

        assert!(response.status().is_client_error());
    }
}
