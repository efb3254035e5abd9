use std::path::PathBuf;
use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Failed to read calendar file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid calendar JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        AppError::Calendar(err.to_string())
    }
}
