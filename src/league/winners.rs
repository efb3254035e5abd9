use std::collections::{BTreeMap, HashMap, HashSet};

use super::models::{MatchResult, MatchdayWinner};
use super::outcome::Outcome;
use crate::predictions::models::Prediction;

/// Users who predicted every resolved match of a matchday correctly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchdayWinners {
    pub matchday: String,
    pub resolved_matches: usize,
    pub usernames: Vec<String>,
}

impl MatchdayWinners {
    pub fn has_winner(&self) -> bool {
        !self.usernames.is_empty()
    }

    pub fn records(&self) -> Vec<MatchdayWinner> {
        self.usernames
            .iter()
            .map(|username| MatchdayWinner {
                username: username.clone(),
                matchday: self.matchday.clone(),
            })
            .collect()
    }
}

/// Finds the winners of `matchday`.
///
/// Only matches with a known outcome count. A user wins when their correct
/// picks cover all of them; with nothing resolved nobody wins.
pub fn detect_matchday_winners(
    matchday: &str,
    predictions: &[Prediction],
    matches: &[MatchResult],
) -> MatchdayWinners {
    let outcomes: HashMap<(&str, &str), Outcome> = matches
        .iter()
        .filter(|m| m.matchday == matchday)
        .filter_map(|m| {
            m.outcome()
                .map(|outcome| ((m.home_team.as_str(), m.away_team.as_str()), outcome))
        })
        .collect();
    let resolved_matches = outcomes.len();

    if resolved_matches == 0 {
        return MatchdayWinners {
            matchday: matchday.to_string(),
            resolved_matches,
            usernames: Vec::new(),
        };
    }

    let mut correct_by_user: BTreeMap<&str, HashSet<(&str, &str)>> = BTreeMap::new();
    for prediction in predictions.iter().filter(|p| p.matchday == matchday) {
        let fixture = (prediction.home_team.as_str(), prediction.away_team.as_str());
        let correct = correct_by_user
            .entry(prediction.username.as_str())
            .or_default();
        if outcomes.get(&fixture) == Some(&prediction.pick) {
            correct.insert(fixture);
        }
    }

    let usernames = correct_by_user
        .into_iter()
        .filter(|(_, correct)| correct.len() == resolved_matches)
        .map(|(username, _)| username.to_string())
        .collect();

    MatchdayWinners {
        matchday: matchday.to_string(),
        resolved_matches,
        usernames,
    }
}
