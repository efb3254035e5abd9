use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::models::{ClassificationRecord, MatchResult, TeamStat};

/// Folds every played match into per-team counters.
///
/// Every team named in `matches` gets an entry, so a team that has not played
/// yet shows up with zeroed stats. Unplayed matches contribute nothing else.
pub fn accumulate_team_stats(matches: &[MatchResult]) -> BTreeMap<String, TeamStat> {
    let mut stats: BTreeMap<String, TeamStat> = BTreeMap::new();

    for result in matches {
        stats.entry(result.home_team.clone()).or_default();
        stats.entry(result.away_team.clone()).or_default();
    }

    for result in matches {
        let (Some(home_goals), Some(away_goals), Some(outcome)) =
            (result.home_goals, result.away_goals, result.outcome())
        else {
            continue;
        };
        let (home_points, away_points) = outcome.points();

        if let Some(home) = stats.get_mut(&result.home_team) {
            home.home_points += home_points;
            home.played_home += 1;
            home.goals_for += home_goals;
            home.goals_against += away_goals;
        }

        if let Some(away) = stats.get_mut(&result.away_team) {
            away.away_points += away_points;
            away.played_away += 1;
            away.goals_for += away_goals;
            away.goals_against += home_goals;
        }
    }

    stats
}

/// Orders teams into the classification.
///
/// Higher average points first; at equal average the team with fewer games
/// ranks higher; remaining ties fall back to team name.
pub fn rank_classification(stats: &BTreeMap<String, TeamStat>) -> Vec<ClassificationRecord> {
    let mut ranked: Vec<(&String, &TeamStat)> = stats.iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| {
        compare_standing(a, b).then_with(|| a_name.cmp(b_name))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (team, stat))| ClassificationRecord::from_stat(team, stat, index as u32 + 1))
        .collect()
}

fn compare_standing(a: &TeamStat, b: &TeamStat) -> Ordering {
    let (a_points, a_games) = average_fraction(a);
    let (b_points, b_games) = average_fraction(b);

    // b_points / b_games vs a_points / a_games, cross-multiplied to stay exact
    (b_points * a_games)
        .cmp(&(a_points * b_games))
        .then_with(|| a.games_played().cmp(&b.games_played()))
}

fn average_fraction(stat: &TeamStat) -> (u64, u64) {
    match stat.games_played() {
        0 => (0, 1),
        games => (u64::from(stat.total_points()), u64::from(games)),
    }
}
