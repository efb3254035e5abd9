use serde::{Deserialize, Serialize};

/// One matchday as written by the federation calendar scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMatchday {
    /// Label such as "Jornada 3"
    pub jornada: String,
    /// `DD-MM-YYYY`
    pub date: String,
    #[serde(default)]
    pub matches: Vec<CalendarMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMatch {
    pub home_team: String,
    #[serde(default)]
    pub home_logo: Option<String>,
    #[serde(default)]
    pub home_score: Option<RawScore>,
    pub away_team: String,
    #[serde(default)]
    pub away_logo: Option<String>,
    #[serde(default)]
    pub away_score: Option<RawScore>,
    #[serde(default)]
    pub match_report: Option<String>,
}

/// Scores are scraped as text, but hand-edited files may carry numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScore {
    Number(i64),
    Text(String),
}
