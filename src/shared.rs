use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use crate::league::repository::LeagueRepository;
use crate::predictions::repository::PredictionRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub league_repository: Arc<dyn LeagueRepository>,
    pub prediction_repository: Arc<dyn PredictionRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        league_repository: Arc<dyn LeagueRepository>,
        prediction_repository: Arc<dyn PredictionRepository>,
        config: AppConfig,
    ) -> Self {
        Self {
            league_repository,
            prediction_repository,
            config: Arc::new(config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Calendar error: {0}")]
    Calendar(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Calendar(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Calendar error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Rounds to two decimals, the precision used for every stored ratio
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Today's date on the server's local clock
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
