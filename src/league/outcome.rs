use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use strum_macros::EnumIter;

/// League points awarded per result
pub mod points {
    pub const WIN: u32 = 3;
    pub const DRAW: u32 = 1;
    pub const LOSS: u32 = 0;
}

/// 1X2 outcome of a match, also used as a user's pick
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Outcome {
    #[serde(rename = "1")]
    HomeWin,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    AwayWin,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::HomeWin => "1",
            Outcome::Draw => "X",
            Outcome::AwayWin => "2",
        }
    }

    /// League points for (home, away)
    pub fn points(&self) -> (u32, u32) {
        match self {
            Outcome::HomeWin => (points::WIN, points::LOSS),
            Outcome::Draw => (points::DRAW, points::DRAW),
            Outcome::AwayWin => (points::LOSS, points::WIN),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Outcome {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "1" => Ok(Outcome::HomeWin),
            "X" => Ok(Outcome::Draw),
            "2" => Ok(Outcome::AwayWin),
            _ => Err(s.to_string()),
        }
    }
}

/// Derives the outcome of a match; `None` until both scores are known
pub fn classify_result(home_goals: Option<u32>, away_goals: Option<u32>) -> Option<Outcome> {
    let (home, away) = (home_goals?, away_goals?);
    Some(match home.cmp(&away) {
        Ordering::Greater => Outcome::HomeWin,
        Ordering::Equal => Outcome::Draw,
        Ordering::Less => Outcome::AwayWin,
    })
}
