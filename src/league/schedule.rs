use chrono::NaiveDate;

use super::models::{sort_chronologically, Matchday};

/// Earliest matchday dated today or later, else the last one on the calendar
pub fn next_matchday(matchdays: &[Matchday], today: NaiveDate) -> Option<Matchday> {
    let mut ordered = matchdays.to_vec();
    sort_chronologically(&mut ordered);

    ordered
        .iter()
        .find(|m| m.date >= today)
        .or_else(|| ordered.last())
        .cloned()
}

/// Most recent matchday dated on or before today
pub fn last_matchday(matchdays: &[Matchday], today: NaiveDate) -> Option<Matchday> {
    let mut ordered = matchdays.to_vec();
    sort_chronologically(&mut ordered);

    ordered.into_iter().rev().find(|m| m.date <= today)
}

/// Matchdays in chronological order up to and including the next upcoming one
pub fn matchdays_through_next(matchdays: &[Matchday], today: NaiveDate) -> Vec<Matchday> {
    let Some(next) = next_matchday(matchdays, today) else {
        return Vec::new();
    };

    let mut ordered = matchdays.to_vec();
    sort_chronologically(&mut ordered);
    ordered
        .into_iter()
        .filter(|m| m.chronological_key() <= next.chronological_key())
        .collect()
}
