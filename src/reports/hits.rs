use std::collections::{BTreeMap, HashMap};

use super::models::{HitRatio, UserHits};
use crate::league::models::MatchResult;
use crate::league::outcome::Outcome;
use crate::predictions::models::Prediction;
use crate::shared::round2;

type FixtureKey<'a> = (&'a str, &'a str, &'a str);

fn resolved_outcomes(results: &[MatchResult]) -> HashMap<FixtureKey<'_>, Outcome> {
    results
        .iter()
        .filter_map(|r| {
            r.outcome().map(|outcome| {
                (
                    (r.matchday.as_str(), r.home_team.as_str(), r.away_team.as_str()),
                    outcome,
                )
            })
        })
        .collect()
}

/// Correct picks per user over every resolved match, most hits first
pub fn all_time_hits(predictions: &[Prediction], results: &[MatchResult]) -> Vec<UserHits> {
    let outcomes = resolved_outcomes(results);

    let mut hits: BTreeMap<&str, u32> = BTreeMap::new();
    for prediction in predictions {
        let key = (
            prediction.matchday.as_str(),
            prediction.home_team.as_str(),
            prediction.away_team.as_str(),
        );
        let Some(outcome) = outcomes.get(&key) else {
            continue;
        };
        let count = hits.entry(prediction.username.as_str()).or_default();
        if *outcome == prediction.pick {
            *count += 1;
        }
    }

    let mut ranked: Vec<UserHits> = hits
        .into_iter()
        .map(|(username, hits)| UserHits {
            username: username.to_string(),
            hits,
        })
        .collect();
    // stable sort keeps usernames ascending among equal hit counts
    ranked.sort_by(|a, b| b.hits.cmp(&a.hits));
    ranked
}

/// Share of each user's picks for `matchday` that were correct, best first.
///
/// The denominator is every prediction the user made for the matchday.
pub fn hit_ratio_for_matchday(
    matchday: &str,
    predictions: &[Prediction],
    results: &[MatchResult],
) -> Vec<HitRatio> {
    let outcomes = resolved_outcomes(results);

    let mut tallies: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for prediction in predictions.iter().filter(|p| p.matchday == matchday) {
        let (hits, total) = tallies.entry(prediction.username.as_str()).or_default();
        *total += 1;
        let key = (
            prediction.matchday.as_str(),
            prediction.home_team.as_str(),
            prediction.away_team.as_str(),
        );
        if outcomes.get(&key) == Some(&prediction.pick) {
            *hits += 1;
        }
    }

    let mut ratios: Vec<HitRatio> = tallies
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|(username, (hits, total))| HitRatio {
            username: username.to_string(),
            hits,
            predictions: total,
            hit_ratio: round2(f64::from(hits) / f64::from(total)),
        })
        .collect();
    ratios.sort_by(|a, b| b.hit_ratio.total_cmp(&a.hit_ratio));
    ratios
}
