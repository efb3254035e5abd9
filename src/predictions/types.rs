use serde::{Deserialize, Serialize};

use crate::league::outcome::Outcome;

/// Request payload for saving a user's picks for one matchday
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPredictionsRequest {
    pub username: String,
    pub matchday: String,
    pub picks: Vec<PickRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickRequest {
    pub home_team: String,
    pub away_team: String,
    pub pick: Outcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitPredictionsResponse {
    pub username: String,
    pub matchday: String,
    pub saved: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub usernames: Vec<String>,
}
