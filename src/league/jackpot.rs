use serde::{Deserialize, Serialize};

use super::models::JackpotEntry;
use super::winners::MatchdayWinners;

pub const DEFAULT_JACKPOT_UNIT: i64 = 16;

/// Value the jackpot takes on a matchday that has a winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JackpotReset {
    Unit,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotPolicy {
    /// Amount added for every matchday without a winner
    pub unit: i64,
    pub reset: JackpotReset,
}

impl Default for JackpotPolicy {
    fn default() -> Self {
        Self {
            unit: DEFAULT_JACKPOT_UNIT,
            reset: JackpotReset::Unit,
        }
    }
}

impl JackpotPolicy {
    pub fn reset_value(&self) -> i64 {
        match self.reset {
            JackpotReset::Unit => self.unit,
            JackpotReset::Zero => 0,
        }
    }
}

/// Walks matchdays in chronological order and records the running jackpot.
///
/// The first matchday is seeded with 0. Every later matchday takes the reset
/// value when it has a winner of its own, otherwise the previous value plus
/// one unit.
pub fn accumulate_jackpot(
    matchdays: &[MatchdayWinners],
    policy: &JackpotPolicy,
) -> Vec<JackpotEntry> {
    let mut entries: Vec<JackpotEntry> = Vec::with_capacity(matchdays.len());

    for matchday in matchdays {
        let accumulated = match entries.last() {
            None => 0,
            Some(_) if matchday.has_winner() => policy.reset_value(),
            Some(previous) => previous.accumulated + policy.unit,
        };

        entries.push(JackpotEntry {
            matchday: matchday.matchday.clone(),
            accumulated,
        });
    }

    entries
}
