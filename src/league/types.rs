use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::{MatchResult, Matchday};
use super::outcome::Outcome;

/// A match as shown to the UI, with team logos and its derived outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub home_team: String,
    pub home_logo: Option<String>,
    pub away_team: String,
    pub away_logo: Option<String>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub result: Option<Outcome>,
}

impl MatchResponse {
    /// `logos` maps team name to logo URL
    pub fn with_logos(result: MatchResult, logos: &HashMap<String, String>) -> Self {
        let outcome = result.outcome();
        Self {
            home_logo: logos.get(&result.home_team).cloned(),
            away_logo: logos.get(&result.away_team).cloned(),
            home_team: result.home_team,
            away_team: result.away_team,
            home_goals: result.home_goals,
            away_goals: result.away_goals,
            result: outcome,
        }
    }
}

/// Response for a matchday together with its fixtures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchdayResponse {
    pub matchday: Matchday,
    pub matches: Vec<MatchResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JackpotResponse {
    pub matchday: String,
    pub accumulated: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WinnersResponse {
    pub matchday: String,
    pub usernames: Vec<String>,
}
