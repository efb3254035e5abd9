use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::outcome::{classify_result, Outcome};
use crate::shared::round2;

/// One round of fixtures ("jornada")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchday {
    pub number: String,
    pub date: NaiveDate,
}

impl Matchday {
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
        }
    }

    /// Chronological ordering key; the matchday number breaks same-day ties
    pub fn chronological_key(&self) -> (NaiveDate, u32, &str) {
        (
            self.date,
            self.number.parse().unwrap_or(u32::MAX),
            &self.number,
        )
    }
}

pub fn sort_chronologically(matchdays: &mut [Matchday]) {
    matchdays.sort_by(|a, b| a.chronological_key().cmp(&b.chronological_key()));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub logo: Option<String>,
}

/// Row of the results table: a fixture and, once played, its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matchday: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl MatchResult {
    pub fn outcome(&self) -> Option<Outcome> {
        classify_result(self.home_goals, self.away_goals)
    }

    pub fn is_played(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_fixture(&self, home_team: &str, away_team: &str) -> bool {
        self.home_team == home_team && self.away_team == away_team
    }
}

/// Per-team counters folded from the played matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStat {
    pub home_points: u32,
    pub away_points: u32,
    pub played_home: u32,
    pub played_away: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamStat {
    pub fn total_points(&self) -> u32 {
        self.home_points + self.away_points
    }

    pub fn games_played(&self) -> u32 {
        self.played_home + self.played_away
    }

    pub fn avg_points(&self) -> f64 {
        ratio(self.total_points(), self.games_played())
    }

    pub fn home_points_ratio(&self) -> f64 {
        ratio(self.home_points, self.played_home)
    }

    pub fn away_points_ratio(&self) -> f64 {
        ratio(self.away_points, self.played_away)
    }

    pub fn avg_goals_for(&self) -> f64 {
        f64::from(self.goals_for) / f64::from(self.games_played().max(1))
    }

    pub fn avg_goals_against(&self) -> f64 {
        f64::from(self.goals_against) / f64::from(self.games_played().max(1))
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

/// One row of the standings, keyed by team name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub team: String,
    pub position: u32,
    pub avg_points: f64,
    pub total_points: u32,
    pub games_played: u32,
    pub home_points_ratio: f64,
    pub away_points_ratio: f64,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
}

impl ClassificationRecord {
    pub fn from_stat(team: &str, stat: &TeamStat, position: u32) -> Self {
        Self {
            team: team.to_string(),
            position,
            avg_points: round2(stat.avg_points()),
            total_points: stat.total_points(),
            games_played: stat.games_played(),
            home_points_ratio: round2(stat.home_points_ratio()),
            away_points_ratio: round2(stat.away_points_ratio()),
            avg_goals_for: round2(stat.avg_goals_for()),
            avg_goals_against: round2(stat.avg_goals_against()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchdayWinner {
    pub username: String,
    pub matchday: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotEntry {
    pub matchday: String,
    pub accumulated: i64,
}
