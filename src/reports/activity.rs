use std::collections::{BTreeMap, BTreeSet};

use strum::IntoEnumIterator;

use super::models::{
    MatchDistribution, MatchPredictions, PickCounts, PickGroup, PickStatus, UserActivity,
};
use crate::league::models::MatchResult;
use crate::league::outcome::Outcome;
use crate::predictions::models::Prediction;

/// Number of distinct users that have predicted anything
pub fn count_users(predictions: &[Prediction]) -> usize {
    predictions
        .iter()
        .map(|p| p.username.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Users with the most predictions, at most `limit` of them
pub fn most_active_users(predictions: &[Prediction], limit: usize) -> Vec<UserActivity> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for prediction in predictions {
        *counts.entry(prediction.username.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<UserActivity> = counts
        .into_iter()
        .map(|(username, predictions)| UserActivity {
            username: username.to_string(),
            predictions,
        })
        .collect();
    ranked.sort_by(|a, b| b.predictions.cmp(&a.predictions));
    ranked.truncate(limit);
    ranked
}

pub fn pick_counts(predictions: &[Prediction]) -> PickCounts {
    PickCounts::tally(predictions.iter().map(|p| p.pick))
}

fn for_match<'a>(
    result: &'a MatchResult,
    predictions: &'a [Prediction],
) -> impl Iterator<Item = &'a Prediction> {
    predictions.iter().filter(move |p| {
        p.is_for_fixture(&result.matchday, &result.home_team, &result.away_team)
    })
}

/// Share of 1, X and 2 among the picks for each match, in fixture order
pub fn pick_distribution(
    results: &[MatchResult],
    predictions: &[Prediction],
) -> Vec<MatchDistribution> {
    results
        .iter()
        .map(|result| {
            let counts = PickCounts::tally(for_match(result, predictions).map(|p| p.pick));
            MatchDistribution {
                home_team: result.home_team.clone(),
                away_team: result.away_team.clone(),
                predictions: counts.total(),
                shares: counts.shares(),
            }
        })
        .collect()
}

/// Usernames grouped under each pick, flagged against the match outcome
pub fn predictions_by_pick(result: &MatchResult, predictions: &[Prediction]) -> MatchPredictions {
    let outcome = result.outcome();

    let mut picked: BTreeMap<Outcome, BTreeSet<&str>> = BTreeMap::new();
    for prediction in for_match(result, predictions) {
        picked
            .entry(prediction.pick)
            .or_default()
            .insert(prediction.username.as_str());
    }

    let groups = Outcome::iter()
        .map(|pick| PickGroup {
            pick,
            status: match outcome {
                None => PickStatus::Pending,
                Some(outcome) if outcome == pick => PickStatus::Correct,
                Some(_) => PickStatus::Wrong,
            },
            usernames: picked
                .get(&pick)
                .map(|names| names.iter().map(|n| n.to_string()).collect())
                .unwrap_or_default(),
        })
        .collect();

    MatchPredictions {
        home_team: result.home_team.clone(),
        away_team: result.away_team.clone(),
        result: outcome,
        groups,
    }
}
