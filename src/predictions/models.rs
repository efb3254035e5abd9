use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::league::outcome::Outcome;

/// A user's 1X2 pick for one match of a matchday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub username: String,
    pub matchday: String,
    pub home_team: String,
    pub away_team: String,
    pub pick: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl Prediction {
    pub fn is_for_fixture(&self, matchday: &str, home_team: &str, away_team: &str) -> bool {
        self.matchday == matchday && self.home_team == home_team && self.away_team == away_team
    }
}
