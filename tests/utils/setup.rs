use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use futsal_predictor::{
    config::AppConfig,
    league::repository::InMemoryLeagueRepository,
    predictions::{models::Prediction, repository::InMemoryPredictionRepository},
    routes, AppState, JackpotPolicy, LeagueService,
};

use super::calendar_builders::CalendarBuilder;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub league_repository: Arc<InMemoryLeagueRepository>,
    pub prediction_repository: Arc<InMemoryPredictionRepository>,
    pub calendar_path: PathBuf,
    pub app: Router,
}

impl TestSetup {
    pub fn league_service(&self) -> LeagueService {
        LeagueService::new(
            self.league_repository.clone(),
            self.prediction_repository.clone(),
            JackpotPolicy::default(),
        )
    }
}

impl Drop for TestSetup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.calendar_path);
    }
}

pub struct TestSetupBuilder {
    name: String,
    calendar: Option<CalendarBuilder>,
    predictions: Vec<Prediction>,
}

impl TestSetupBuilder {
    /// `name` keeps calendar files of concurrently running tests apart
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calendar: None,
            predictions: vec![],
        }
    }

    pub fn with_calendar(mut self, calendar: CalendarBuilder) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_predictions(mut self, predictions: Vec<Prediction>) -> Self {
        self.predictions = predictions;
        self
    }

    pub async fn build(self) -> TestSetup {
        let calendar_path = std::env::temp_dir().join(format!(
            "futsal_calendar_{}_{}.json",
            std::process::id(),
            self.name
        ));
        if let Some(calendar) = self.calendar {
            tokio::fs::write(&calendar_path, calendar.to_json())
                .await
                .unwrap();
        }

        let league_repository = Arc::new(InMemoryLeagueRepository::new());
        let prediction_repository = Arc::new(InMemoryPredictionRepository::with_predictions(
            self.predictions,
        ));

        let config = AppConfig {
            calendar_path: calendar_path.clone(),
            ..AppConfig::default()
        };
        let state = AppState::new(
            league_repository.clone(),
            prediction_repository.clone(),
            config,
        );

        TestSetup {
            league_repository,
            prediction_repository,
            calendar_path,
            app: routes::app(state),
        }
    }
}
