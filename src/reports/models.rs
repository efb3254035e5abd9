use serde::{Deserialize, Serialize};

use crate::league::outcome::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHits {
    pub username: String,
    pub hits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRatio {
    pub username: String,
    pub hits: u32,
    pub predictions: u32,
    /// hits / predictions, two decimals
    pub hit_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub username: String,
    pub predictions: u32,
}

/// How many times each of 1, X and 2 was picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickCounts {
    #[serde(rename = "1")]
    pub home_win: u32,
    #[serde(rename = "X")]
    pub draw: u32,
    #[serde(rename = "2")]
    pub away_win: u32,
}

impl PickCounts {
    pub fn tally(picks: impl IntoIterator<Item = Outcome>) -> Self {
        let mut counts = Self::default();
        for pick in picks {
            match pick {
                Outcome::HomeWin => counts.home_win += 1,
                Outcome::Draw => counts.draw += 1,
                Outcome::AwayWin => counts.away_win += 1,
            }
        }
        counts
    }

    pub fn get(&self, pick: Outcome) -> u32 {
        match pick {
            Outcome::HomeWin => self.home_win,
            Outcome::Draw => self.draw,
            Outcome::AwayWin => self.away_win,
        }
    }

    pub fn total(&self) -> u32 {
        self.home_win + self.draw + self.away_win
    }

    /// Fractions of the total; all zero when nothing was picked
    pub fn shares(&self) -> PickShares {
        let total = self.total();
        let share = |count: u32| {
            if total == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(total)
            }
        };

        PickShares {
            home_win: share(self.home_win),
            draw: share(self.draw),
            away_win: share(self.away_win),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PickShares {
    #[serde(rename = "1")]
    pub home_win: f64,
    #[serde(rename = "X")]
    pub draw: f64,
    #[serde(rename = "2")]
    pub away_win: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDistribution {
    pub home_team: String,
    pub away_team: String,
    pub predictions: u32,
    pub shares: PickShares,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickStatus {
    Correct,
    Wrong,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickGroup {
    pub pick: Outcome,
    pub status: PickStatus,
    pub usernames: Vec<String>,
}

/// Users' picks for one match, grouped by pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPredictions {
    pub home_team: String,
    pub away_team: String,
    pub result: Option<Outcome>,
    pub groups: Vec<PickGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub users: usize,
    pub predictions: usize,
    pub picks: PickCounts,
}
