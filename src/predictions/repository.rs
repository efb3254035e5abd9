use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::Prediction;
use crate::league::outcome::Outcome;
use crate::shared::AppError;

/// Trait for prediction repository operations
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Deletes the user's predictions for `matchday`, then stores `predictions`
    async fn replace_user_predictions(
        &self,
        username: &str,
        matchday: &str,
        predictions: &[Prediction],
    ) -> Result<(), AppError>;

    /// All predictions, newest first
    async fn list_predictions(&self) -> Result<Vec<Prediction>, AppError>;

    async fn list_predictions_for_matchday(
        &self,
        matchday: &str,
    ) -> Result<Vec<Prediction>, AppError>;

    /// Distinct usernames, sorted
    async fn list_usernames(&self) -> Result<Vec<String>, AppError>;
}

/// In-memory implementation of PredictionRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryPredictionRepository {
    predictions: RwLock<Vec<Prediction>>,
}

impl InMemoryPredictionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory repository with pre-populated predictions
    pub fn with_predictions(predictions: Vec<Prediction>) -> Self {
        Self {
            predictions: RwLock::new(predictions),
        }
    }
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    #[instrument(skip(self, predictions), fields(count = predictions.len()))]
    async fn replace_user_predictions(
        &self,
        username: &str,
        matchday: &str,
        predictions: &[Prediction],
    ) -> Result<(), AppError> {
        let mut stored = self.predictions.write().await;
        let before = stored.len();
        stored.retain(|p| !(p.username == username && p.matchday == matchday));
        let removed = before - stored.len();
        stored.extend(predictions.iter().cloned());

        debug!(removed, "Predictions replaced in memory");
        Ok(())
    }

    async fn list_predictions(&self) -> Result<Vec<Prediction>, AppError> {
        let mut predictions = self.predictions.read().await.clone();
        predictions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(predictions)
    }

    async fn list_predictions_for_matchday(
        &self,
        matchday: &str,
    ) -> Result<Vec<Prediction>, AppError> {
        let predictions = self.predictions.read().await;
        Ok(predictions
            .iter()
            .filter(|p| p.matchday == matchday)
            .cloned()
            .collect())
    }

    async fn list_usernames(&self) -> Result<Vec<String>, AppError> {
        let predictions = self.predictions.read().await;
        let mut usernames: Vec<String> = predictions.iter().map(|p| p.username.clone()).collect();
        usernames.sort();
        usernames.dedup();
        Ok(usernames)
    }
}

/// PostgreSQL implementation of prediction repository
pub struct PostgresPredictionRepository {
    pool: PgPool,
}

impl PostgresPredictionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn prediction_from_row(row: &sqlx::postgres::PgRow) -> Option<Prediction> {
    let raw_pick: String = row.get("prediction");
    let pick = match Outcome::try_from(raw_pick.as_str()) {
        Ok(pick) => pick,
        Err(value) => {
            warn!(pick = %value, "Skipping stored prediction with unknown pick");
            return None;
        }
    };

    Some(Prediction {
        username: row.get("username"),
        matchday: row.get("matchday"),
        home_team: row.get("home_team"),
        away_team: row.get("away_team"),
        pick,
        timestamp: row.get::<DateTime<Utc>, _>("timestamp"),
    })
}

#[async_trait]
impl PredictionRepository for PostgresPredictionRepository {
    #[instrument(skip(self, predictions), fields(count = predictions.len()))]
    async fn replace_user_predictions(
        &self,
        username: &str,
        matchday: &str,
        predictions: &[Prediction],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            warn!(error = %e, "Failed to open transaction for predictions");
            AppError::DatabaseError(e.to_string())
        })?;

        let deleted = sqlx::query("DELETE FROM predictions WHERE username = $1 AND matchday = $2")
            .bind(username)
            .bind(matchday)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete previous predictions");
                AppError::DatabaseError(e.to_string())
            })?;

        for prediction in predictions {
            sqlx::query(
                "INSERT INTO predictions \
                 (username, matchday, home_team, away_team, prediction, timestamp) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&prediction.username)
            .bind(&prediction.matchday)
            .bind(&prediction.home_team)
            .bind(&prediction.away_team)
            .bind(prediction.pick.as_str())
            .bind(prediction.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert prediction");
                AppError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit predictions");
            AppError::DatabaseError(e.to_string())
        })?;

        info!(
            removed = deleted.rows_affected(),
            "Predictions replaced in database"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_predictions(&self) -> Result<Vec<Prediction>, AppError> {
        let rows = sqlx::query(
            "SELECT username, matchday, home_team, away_team, prediction, timestamp \
             FROM predictions ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list predictions");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().filter_map(prediction_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn list_predictions_for_matchday(
        &self,
        matchday: &str,
    ) -> Result<Vec<Prediction>, AppError> {
        let rows = sqlx::query(
            "SELECT username, matchday, home_team, away_team, prediction, timestamp \
             FROM predictions WHERE matchday = $1",
        )
        .bind(matchday)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, matchday, "Failed to list predictions for matchday");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().filter_map(prediction_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn list_usernames(&self) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT DISTINCT username FROM predictions ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list usernames");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(rows.iter().map(|row| row.get("username")).collect())
    }
}
