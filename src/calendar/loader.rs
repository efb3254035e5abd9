use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::errors::CalendarError;
use super::models::{CalendarMatch, CalendarMatchday, RawScore};
use crate::league::models::{MatchResult, Matchday, Team};

const CALENDAR_DATE_FORMAT: &str = "%d-%m-%Y";

#[instrument]
pub async fn load_calendar(path: &Path) -> Result<Vec<CalendarMatchday>, CalendarError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let calendar = parse_calendar(&raw)?;
    info!(matchdays = calendar.len(), "Calendar loaded");
    Ok(calendar)
}

pub fn parse_calendar(raw: &str) -> Result<Vec<CalendarMatchday>, CalendarError> {
    Ok(serde_json::from_str(raw)?)
}

/// Typed league facts extracted from a scraped calendar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarRecords {
    pub matchdays: Vec<Matchday>,
    pub teams: Vec<Team>,
    pub results: Vec<MatchResult>,
}

impl CalendarRecords {
    /// Normalizes the scraped calendar, skipping malformed pieces with a warning
    pub fn from_calendar(calendar: &[CalendarMatchday]) -> Self {
        let mut matchdays = Vec::new();
        let mut logos: BTreeMap<String, Option<String>> = BTreeMap::new();
        let mut results = Vec::new();

        for entry in calendar {
            let Some(number) = matchday_number(&entry.jornada) else {
                warn!(label = %entry.jornada, "Matchday label has no number, skipping");
                continue;
            };

            match parse_date(&entry.date) {
                Some(date) => matchdays.push(Matchday::new(number.clone(), date)),
                None => warn!(matchday = %number, date = %entry.date, "Invalid matchday date"),
            }

            for fixture in &entry.matches {
                remember_logo(&mut logos, &fixture.home_team, &fixture.home_logo);
                remember_logo(&mut logos, &fixture.away_team, &fixture.away_logo);
                results.push(match_result(&number, fixture));
            }
        }

        let teams = logos
            .into_iter()
            .map(|(name, logo)| Team { name, logo })
            .collect();

        debug!(
            matchdays = matchdays.len(),
            results = results.len(),
            "Calendar normalized"
        );

        Self {
            matchdays,
            teams,
            results,
        }
    }
}

fn remember_logo(logos: &mut BTreeMap<String, Option<String>>, team: &str, logo: &Option<String>) {
    let slot = logos.entry(team.to_string()).or_default();
    if logo.is_some() {
        slot.clone_from(logo);
    }
}

fn match_result(matchday: &str, fixture: &CalendarMatch) -> MatchResult {
    let home_goals = parse_goals(fixture.home_score.as_ref());
    let away_goals = parse_goals(fixture.away_score.as_ref());

    let (home_goals, away_goals) = match (home_goals, away_goals) {
        (Ok(home), Ok(away)) => (home, away),
        (home, away) => {
            warn!(
                matchday,
                home_team = %fixture.home_team,
                away_team = %fixture.away_team,
                home_score = ?home.err(),
                away_score = ?away.err(),
                "Unparsable score, leaving match unresolved"
            );
            (None, None)
        }
    };

    MatchResult {
        matchday: matchday.to_string(),
        home_team: fixture.home_team.clone(),
        away_team: fixture.away_team.clone(),
        home_goals,
        away_goals,
    }
}

/// Digits of a label such as "Jornada 12"
pub fn matchday_number(label: &str) -> Option<String> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), CALENDAR_DATE_FORMAT).ok()
}

/// `Ok(None)` for a match not played yet, `Err` carrying the raw text when malformed
pub fn parse_goals(raw: Option<&RawScore>) -> Result<Option<u32>, String> {
    match raw {
        None => Ok(None),
        Some(RawScore::Number(n)) => u32::try_from(*n).map(Some).map_err(|_| n.to_string()),
        Some(RawScore::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(|_| text.to_string())
            }
        }
    }
}
