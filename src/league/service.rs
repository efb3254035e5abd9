use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    jackpot::{accumulate_jackpot, JackpotPolicy},
    models::{ClassificationRecord, MatchResult, Matchday, MatchdayWinner},
    repository::LeagueRepository,
    schedule::{last_matchday, matchdays_through_next, next_matchday},
    standings::{accumulate_team_stats, rank_classification},
    winners::{detect_matchday_winners, MatchdayWinners},
};
use crate::calendar::{CalendarMatchday, CalendarRecords};
use crate::predictions::repository::PredictionRepository;
use crate::shared::AppError;

/// Counts of what a refresh wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RefreshSummary {
    pub matchdays: usize,
    pub teams: usize,
    pub results: usize,
    pub classified_teams: usize,
    pub winners: usize,
    pub jackpot_entries: usize,
}

/// League facts and the standings, winners and jackpot derived from them
pub struct LeagueService {
    repository: Arc<dyn LeagueRepository>,
    predictions: Arc<dyn PredictionRepository>,
    jackpot_policy: JackpotPolicy,
}

impl LeagueService {
    pub fn new(
        repository: Arc<dyn LeagueRepository>,
        predictions: Arc<dyn PredictionRepository>,
        jackpot_policy: JackpotPolicy,
    ) -> Self {
        Self {
            repository,
            predictions,
            jackpot_policy,
        }
    }

    /// Stores the calendar's facts, then recomputes everything derived from them
    #[instrument(skip(self, calendar), fields(calendar_matchdays = calendar.len()))]
    pub async fn refresh(
        &self,
        calendar: &[CalendarMatchday],
        today: NaiveDate,
    ) -> Result<RefreshSummary, AppError> {
        let records = CalendarRecords::from_calendar(calendar);

        self.repository.upsert_matchdays(&records.matchdays).await?;
        self.repository.upsert_teams(&records.teams).await?;
        self.repository.replace_results(&records.results).await?;
        debug!("Calendar facts stored");

        let mut summary = self.recompute(today).await?;
        summary.matchdays = records.matchdays.len();
        summary.teams = records.teams.len();
        summary.results = records.results.len();

        info!(?summary, "League data refreshed");
        Ok(summary)
    }

    /// Rebuilds classification, winners and jackpot from the stored facts
    #[instrument(skip(self))]
    pub async fn recompute(&self, today: NaiveDate) -> Result<RefreshSummary, AppError> {
        let results = self.repository.list_results().await?;

        let classification = rank_classification(&accumulate_team_stats(&results));
        self.repository
            .replace_classification(&classification)
            .await?;

        let matchdays = self.repository.list_matchdays().await?;
        let sequence = matchdays_through_next(&matchdays, today);

        let mut per_matchday: Vec<MatchdayWinners> = Vec::with_capacity(sequence.len());
        for matchday in &sequence {
            let predictions = self
                .predictions
                .list_predictions_for_matchday(&matchday.number)
                .await?;
            let winners = detect_matchday_winners(&matchday.number, &predictions, &results);
            debug!(
                matchday = %matchday.number,
                resolved = winners.resolved_matches,
                winners = winners.usernames.len(),
                "Matchday winners detected"
            );
            per_matchday.push(winners);
        }

        let winner_records: Vec<MatchdayWinner> =
            per_matchday.iter().flat_map(|w| w.records()).collect();
        self.repository.replace_winners(&winner_records).await?;

        let jackpot = accumulate_jackpot(&per_matchday, &self.jackpot_policy);
        self.repository.replace_jackpot(&jackpot).await?;

        Ok(RefreshSummary {
            classified_teams: classification.len(),
            winners: winner_records.len(),
            jackpot_entries: jackpot.len(),
            ..RefreshSummary::default()
        })
    }

    pub async fn next_matchday(&self, today: NaiveDate) -> Result<Option<Matchday>, AppError> {
        let matchdays = self.repository.list_matchdays().await?;
        Ok(next_matchday(&matchdays, today))
    }

    pub async fn last_matchday(&self, today: NaiveDate) -> Result<Option<Matchday>, AppError> {
        let matchdays = self.repository.list_matchdays().await?;
        Ok(last_matchday(&matchdays, today))
    }

    pub async fn matchday_results(&self, matchday: &str) -> Result<Vec<MatchResult>, AppError> {
        self.repository.list_results_for_matchday(matchday).await
    }

    /// Logo URL per team, for teams that have one
    pub async fn team_logos(&self) -> Result<HashMap<String, String>, AppError> {
        Ok(self
            .repository
            .list_teams()
            .await?
            .into_iter()
            .filter_map(|team| team.logo.map(|logo| (team.name, logo)))
            .collect())
    }

    pub async fn classification(&self) -> Result<Vec<ClassificationRecord>, AppError> {
        self.repository.list_classification().await
    }

    /// Zero when no jackpot has been computed for the matchday
    pub async fn jackpot_for_matchday(&self, matchday: &str) -> Result<i64, AppError> {
        Ok(self
            .repository
            .get_jackpot(matchday)
            .await?
            .map(|entry| entry.accumulated)
            .unwrap_or_default())
    }

    pub async fn winners(&self, matchday: &str) -> Result<Vec<String>, AppError> {
        Ok(self
            .repository
            .list_winners(matchday)
            .await?
            .into_iter()
            .map(|w| w.username)
            .collect())
    }
}
