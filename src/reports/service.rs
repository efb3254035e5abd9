use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    activity::{count_users, most_active_users, pick_counts, pick_distribution, predictions_by_pick},
    hits::{all_time_hits, hit_ratio_for_matchday},
    models::{HitRatio, MatchDistribution, MatchPredictions, Overview, UserActivity, UserHits},
};
use crate::league::repository::LeagueRepository;
use crate::league::schedule::last_matchday;
use crate::predictions::repository::PredictionRepository;
use crate::shared::AppError;

pub const MOST_ACTIVE_LIMIT: usize = 10;

/// Read-only reports over stored predictions and results
pub struct ReportService {
    predictions: Arc<dyn PredictionRepository>,
    league: Arc<dyn LeagueRepository>,
}

impl ReportService {
    pub fn new(
        predictions: Arc<dyn PredictionRepository>,
        league: Arc<dyn LeagueRepository>,
    ) -> Self {
        Self {
            predictions,
            league,
        }
    }

    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<Overview, AppError> {
        let predictions = self.predictions.list_predictions().await?;
        Ok(Overview {
            users: count_users(&predictions),
            predictions: predictions.len(),
            picks: pick_counts(&predictions),
        })
    }

    #[instrument(skip(self))]
    pub async fn top_users(&self) -> Result<Vec<UserHits>, AppError> {
        let predictions = self.predictions.list_predictions().await?;
        let results = self.league.list_results().await?;
        Ok(all_time_hits(&predictions, &results))
    }

    /// Hit ratios for the most recent matchday on or before `today`.
    ///
    /// Returns the matchday number alongside, or `None` when the season
    /// has not started yet.
    #[instrument(skip(self))]
    pub async fn last_matchday_hit_ratios(
        &self,
        today: NaiveDate,
    ) -> Result<Option<(String, Vec<HitRatio>)>, AppError> {
        let matchdays = self.league.list_matchdays().await?;
        let Some(matchday) = last_matchday(&matchdays, today) else {
            debug!("No matchday played yet");
            return Ok(None);
        };

        let predictions = self
            .predictions
            .list_predictions_for_matchday(&matchday.number)
            .await?;
        let results = self
            .league
            .list_results_for_matchday(&matchday.number)
            .await?;

        let ratios = hit_ratio_for_matchday(&matchday.number, &predictions, &results);
        Ok(Some((matchday.number, ratios)))
    }

    #[instrument(skip(self))]
    pub async fn most_active_users(&self) -> Result<Vec<UserActivity>, AppError> {
        let predictions = self.predictions.list_predictions().await?;
        Ok(most_active_users(&predictions, MOST_ACTIVE_LIMIT))
    }

    #[instrument(skip(self))]
    pub async fn matchday_distribution(
        &self,
        matchday: &str,
    ) -> Result<Vec<MatchDistribution>, AppError> {
        let results = self.league.list_results_for_matchday(matchday).await?;
        let predictions = self.predictions.list_predictions_for_matchday(matchday).await?;
        Ok(pick_distribution(&results, &predictions))
    }

    #[instrument(skip(self))]
    pub async fn matchday_predictions(
        &self,
        matchday: &str,
    ) -> Result<Vec<MatchPredictions>, AppError> {
        let results = self.league.list_results_for_matchday(matchday).await?;
        let predictions = self.predictions.list_predictions_for_matchday(matchday).await?;
        Ok(results
            .iter()
            .map(|result| predictions_by_pick(result, &predictions))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::models::{MatchResult, Matchday};
    use crate::league::outcome::Outcome;
    use crate::league::repository::InMemoryLeagueRepository;
    use crate::predictions::models::Prediction;
    use crate::predictions::repository::InMemoryPredictionRepository;
    use chrono::Utc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn result(matchday: &str, home: &str, away: &str, goals: Option<(u32, u32)>) -> MatchResult {
        MatchResult {
            matchday: matchday.into(),
            home_team: home.into(),
            away_team: away.into(),
            home_goals: goals.map(|g| g.0),
            away_goals: goals.map(|g| g.1),
        }
    }

    fn prediction(
        username: &str,
        matchday: &str,
        home: &str,
        away: &str,
        pick: Outcome,
    ) -> Prediction {
        Prediction {
            username: username.into(),
            matchday: matchday.into(),
            home_team: home.into(),
            away_team: away.into(),
            pick,
            timestamp: Utc::now(),
        }
    }

    async fn service() -> ReportService {
        let league = Arc::new(InMemoryLeagueRepository::new());
        league
            .upsert_matchdays(&[Matchday::new("1", date(4)), Matchday::new("2", date(11))])
            .await
            .unwrap();
        league
            .replace_results(&[
                result("1", "A", "B", Some((2, 1))),
                result("1", "C", "D", Some((0, 0))),
                result("2", "B", "C", None),
                result("2", "D", "A", None),
            ])
            .await
            .unwrap();

        let predictions = Arc::new(InMemoryPredictionRepository::with_predictions(vec![
            prediction("anna", "1", "A", "B", Outcome::HomeWin),
            prediction("anna", "1", "C", "D", Outcome::Draw),
            prediction("bea", "1", "A", "B", Outcome::AwayWin),
            prediction("bea", "1", "C", "D", Outcome::Draw),
            prediction("bea", "2", "B", "C", Outcome::HomeWin),
            prediction("bea", "2", "D", "A", Outcome::AwayWin),
        ]));

        ReportService::new(predictions, league)
    }

    #[tokio::test]
    async fn test_overview_counts_users_and_picks() {
        let overview = service().await.overview().await.unwrap();

        assert_eq!(overview.users, 2);
        assert_eq!(overview.predictions, 6);
        assert_eq!(overview.picks.home_win, 2);
        assert_eq!(overview.picks.draw, 2);
        assert_eq!(overview.picks.away_win, 2);
    }

    #[tokio::test]
    async fn test_top_users_ranked_by_hits() {
        let ranked = service().await.top_users().await.unwrap();

        assert_eq!(ranked[0].username, "anna");
        assert_eq!(ranked[0].hits, 2);
        assert_eq!(ranked[1].username, "bea");
        assert_eq!(ranked[1].hits, 1);
    }

    #[tokio::test]
    async fn test_hit_ratio_uses_last_played_matchday() {
        let service = service().await;

        let (matchday, ratios) = service
            .last_matchday_hit_ratios(date(8))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(matchday, "1");
        assert_eq!(ratios[0].username, "anna");
        assert_eq!(ratios[0].hit_ratio, 1.0);
        assert_eq!(ratios[1].hit_ratio, 0.5);

        assert!(service
            .last_matchday_hit_ratios(date(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_hit_ratio_for_unplayed_matchday_is_zero() {
        let (matchday, ratios) = service()
            .await
            .last_matchday_hit_ratios(date(12))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(matchday, "2");
        assert_eq!(ratios.len(), 1);
        assert_eq!(ratios[0].username, "bea");
        assert_eq!(ratios[0].hit_ratio, 0.0);
    }

    #[tokio::test]
    async fn test_matchday_distribution_and_groups() {
        let service = service().await;

        let distribution = service.matchday_distribution("1").await.unwrap();
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].shares.home_win, 0.5);
        assert_eq!(distribution[1].shares.draw, 1.0);

        let grouped = service.matchday_predictions("1").await.unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1].result, Some(Outcome::Draw));
        assert_eq!(grouped[1].groups[1].usernames, vec!["anna", "bea"]);
    }
}
