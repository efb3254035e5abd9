use serde::{Deserialize, Serialize};

use super::models::HitRatio;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HitRatioResponse {
    /// Matchday the ratios refer to, absent before the first one is played
    pub matchday: Option<String>,
    pub ratios: Vec<HitRatio>,
}
