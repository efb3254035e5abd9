use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::Prediction,
    repository::PredictionRepository,
    types::{SubmitPredictionsRequest, SubmitPredictionsResponse},
};
use crate::league::repository::LeagueRepository;
use crate::league::schedule::next_matchday;
use crate::shared::AppError;

/// Service for validating and storing user predictions
pub struct PredictionService {
    repository: Arc<dyn PredictionRepository>,
    league: Arc<dyn LeagueRepository>,
}

impl PredictionService {
    pub fn new(
        repository: Arc<dyn PredictionRepository>,
        league: Arc<dyn LeagueRepository>,
    ) -> Self {
        Self { repository, league }
    }

    /// Stores a full set of picks, replacing the user's earlier ones for the matchday.
    ///
    /// Only the next matchday as of `today` is open, and only until one of its
    /// matches has a result. Every match must be picked exactly once.
    #[instrument(skip(self, request), fields(matchday = %request.matchday))]
    pub async fn submit(
        &self,
        request: SubmitPredictionsRequest,
        today: NaiveDate,
    ) -> Result<SubmitPredictionsResponse, AppError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".to_string()));
        }

        let matchdays = self.league.list_matchdays().await?;
        if !matchdays.iter().any(|m| m.number == request.matchday) {
            return Err(AppError::NotFound(format!(
                "Matchday {} not found",
                request.matchday
            )));
        }

        let open = next_matchday(&matchdays, today).map(|m| m.number);
        if open.as_deref() != Some(request.matchday.as_str()) {
            debug!(open = ?open, "Rejecting predictions for a closed matchday");
            return Err(AppError::Validation(format!(
                "Matchday {} is not open for predictions",
                request.matchday
            )));
        }

        let fixtures = self
            .league
            .list_results_for_matchday(&request.matchday)
            .await?;
        if fixtures.iter().any(|f| f.is_played()) {
            return Err(AppError::Validation(format!(
                "Matchday {} has already started",
                request.matchday
            )));
        }
        let expected: HashSet<(&str, &str)> = fixtures
            .iter()
            .map(|f| (f.home_team.as_str(), f.away_team.as_str()))
            .collect();

        let mut picked: HashSet<(&str, &str)> = HashSet::new();
        for pick in &request.picks {
            let fixture = (pick.home_team.as_str(), pick.away_team.as_str());
            if !expected.contains(&fixture) {
                return Err(AppError::Validation(format!(
                    "{} vs {} is not part of matchday {}",
                    fixture.0, fixture.1, request.matchday
                )));
            }
            if !picked.insert(fixture) {
                return Err(AppError::Validation(format!(
                    "{} vs {} was picked more than once",
                    fixture.0, fixture.1
                )));
            }
        }

        let missing = expected.len() - picked.len();
        if missing > 0 {
            debug!(missing, "Rejecting incomplete predictions");
            return Err(AppError::Validation(format!(
                "Predictions are required for all {} matches",
                expected.len()
            )));
        }

        let timestamp = Utc::now();
        let predictions: Vec<Prediction> = request
            .picks
            .iter()
            .map(|pick| Prediction {
                username: username.to_string(),
                matchday: request.matchday.clone(),
                home_team: pick.home_team.clone(),
                away_team: pick.away_team.clone(),
                pick: pick.pick,
                timestamp,
            })
            .collect();

        self.repository
            .replace_user_predictions(username, &request.matchday, &predictions)
            .await?;

        info!(username, saved = predictions.len(), "Predictions saved");

        Ok(SubmitPredictionsResponse {
            username: username.to_string(),
            matchday: request.matchday,
            saved: predictions.len(),
        })
    }

    pub async fn list_usernames(&self) -> Result<Vec<String>, AppError> {
        self.repository.list_usernames().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::models::{MatchResult, Matchday};
    use crate::league::outcome::Outcome;
    use crate::league::repository::InMemoryLeagueRepository;
    use crate::predictions::repository::InMemoryPredictionRepository;
    use crate::predictions::types::PickRequest;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    // matchday 6 is played on 8 November, matchday 7 is open until the 15th
    fn today() -> NaiveDate {
        date(11, 10)
    }

    fn fixture(home: &str, away: &str) -> MatchResult {
        MatchResult {
            matchday: "7".into(),
            home_team: home.into(),
            away_team: away.into(),
            home_goals: None,
            away_goals: None,
        }
    }

    fn played(matchday: &str, home: &str, away: &str, goals: (u32, u32)) -> MatchResult {
        MatchResult {
            matchday: matchday.into(),
            home_team: home.into(),
            away_team: away.into(),
            home_goals: Some(goals.0),
            away_goals: Some(goals.1),
        }
    }

    fn pick(home: &str, away: &str, pick: Outcome) -> PickRequest {
        PickRequest {
            home_team: home.into(),
            away_team: away.into(),
            pick,
        }
    }

    async fn setup_with(
        results: &[MatchResult],
    ) -> (PredictionService, Arc<InMemoryPredictionRepository>) {
        let league = Arc::new(InMemoryLeagueRepository::new());
        league
            .upsert_matchdays(&[
                Matchday::new("6", date(11, 8)),
                Matchday::new("7", date(11, 15)),
            ])
            .await
            .unwrap();
        league.replace_results(results).await.unwrap();

        let predictions = Arc::new(InMemoryPredictionRepository::new());
        (
            PredictionService::new(predictions.clone(), league),
            predictions,
        )
    }

    async fn setup() -> (PredictionService, Arc<InMemoryPredictionRepository>) {
        setup_with(&[
            played("6", "B", "C", (2, 2)),
            played("6", "D", "A", (0, 1)),
            fixture("A", "B"),
            fixture("C", "D"),
        ])
        .await
    }

    fn request(username: &str, picks: Vec<PickRequest>) -> SubmitPredictionsRequest {
        SubmitPredictionsRequest {
            username: username.into(),
            matchday: "7".into(),
            picks,
        }
    }

    #[tokio::test]
    async fn saves_complete_predictions() {
        let (service, repo) = setup().await;

        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("C", "D", Outcome::Draw)];
        let response = service
            .submit(request(" anna ", picks), today())
            .await
            .unwrap();

        assert_eq!(response.username, "anna");
        assert_eq!(response.saved, 2);
        let stored = repo.list_predictions_for_matchday("7").await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|p| p.username == "anna"));
    }

    #[tokio::test]
    async fn resubmission_replaces_previous_picks() {
        let (service, repo) = setup().await;
        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("C", "D", Outcome::Draw)];
        service.submit(request("anna", picks), today()).await.unwrap();

        let picks = vec![pick("A", "B", Outcome::AwayWin), pick("C", "D", Outcome::AwayWin)];
        service.submit(request("anna", picks), today()).await.unwrap();

        let stored = repo.list_predictions_for_matchday("7").await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|p| p.pick == Outcome::AwayWin));
    }

    #[tokio::test]
    async fn rejects_incomplete_predictions() {
        let (service, repo) = setup().await;

        let result = service
            .submit(request("anna", vec![pick("A", "B", Outcome::HomeWin)]), today())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repo.list_predictions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_username() {
        let (service, _) = setup().await;
        let result = service.submit(request("   ", vec![]), today()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_unknown_fixture_and_duplicates() {
        let (service, _) = setup().await;

        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("D", "C", Outcome::Draw)];
        let unknown = service.submit(request("anna", picks), today()).await;
        assert!(matches!(unknown, Err(AppError::Validation(_))));

        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("A", "B", Outcome::Draw)];
        let duplicate = service.submit(request("anna", picks), today()).await;
        assert!(matches!(duplicate, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_unknown_matchday() {
        let (service, _) = setup().await;
        let mut req = request("anna", vec![]);
        req.matchday = "99".into();

        let result = service.submit(req, today()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejects_matchday_already_played() {
        let (service, repo) = setup().await;
        let mut req = request(
            "late",
            vec![pick("B", "C", Outcome::Draw), pick("D", "A", Outcome::AwayWin)],
        );
        req.matchday = "6".into();

        let result = service.submit(req, today()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repo.list_predictions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_next_matchday_once_a_result_is_in() {
        let (service, _) = setup_with(&[played("7", "A", "B", (1, 0)), fixture("C", "D")]).await;

        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("C", "D", Outcome::Draw)];
        let result = service.submit(request("late", picks), today()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn repeated_fixture_rows_count_once() {
        let (service, _) =
            setup_with(&[fixture("A", "B"), fixture("A", "B"), fixture("C", "D")]).await;

        let picks = vec![pick("A", "B", Outcome::HomeWin), pick("C", "D", Outcome::Draw)];
        let response = service
            .submit(request("anna", picks), today())
            .await
            .unwrap();

        assert_eq!(response.saved, 2);
    }
}
