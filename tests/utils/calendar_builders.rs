use chrono::NaiveDate;

use futsal_predictor::calendar::{CalendarMatch, CalendarMatchday, RawScore};

// ============================================================================
// Calendar Setup Utilities
// ============================================================================

/// Builds scraped calendars the way the federation scraper writes them
pub struct CalendarBuilder {
    matchdays: Vec<CalendarMatchday>,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self { matchdays: vec![] }
    }

    /// Starts a new matchday; following `played`/`fixture` calls add to it
    pub fn matchday(mut self, number: u32, date: NaiveDate) -> Self {
        self.matchdays.push(CalendarMatchday {
            jornada: format!("Jornada {number}"),
            date: date.format("%d-%m-%Y").to_string(),
            matches: vec![],
        });
        self
    }

    pub fn played(self, home: &str, home_goals: u32, away: &str, away_goals: u32) -> Self {
        self.with_match(
            home,
            Some(RawScore::Text(home_goals.to_string())),
            away,
            Some(RawScore::Text(away_goals.to_string())),
        )
    }

    pub fn fixture(self, home: &str, away: &str) -> Self {
        self.with_match(home, None, away, None)
    }

    /// A match whose score cell came out garbled
    pub fn garbled(self, home: &str, away: &str) -> Self {
        self.with_match(
            home,
            Some(RawScore::Text("-".into())),
            away,
            Some(RawScore::Text("aplazado".into())),
        )
    }

    fn with_match(
        mut self,
        home: &str,
        home_score: Option<RawScore>,
        away: &str,
        away_score: Option<RawScore>,
    ) -> Self {
        let matchday = self
            .matchdays
            .last_mut()
            .expect("call matchday() before adding matches");
        matchday.matches.push(CalendarMatch {
            home_team: home.to_string(),
            home_logo: Some(format!("logos/{}.png", home.to_lowercase())),
            home_score,
            away_team: away.to_string(),
            away_logo: Some(format!("logos/{}.png", away.to_lowercase())),
            away_score,
            match_report: None,
        });
        self
    }

    pub fn build(self) -> Vec<CalendarMatchday> {
        self.matchdays
    }

    pub fn to_json(self) -> String {
        serde_json::to_string_pretty(&self.matchdays).expect("calendar serializes")
    }
}
