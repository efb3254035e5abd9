// Library crate for the futsal prediction league
// This file exposes the public API for the binary and integration tests

pub mod calendar;
pub mod config;
pub mod league;
pub mod predictions;
pub mod reports;
pub mod routes;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use league::{
    jackpot::JackpotPolicy, outcome::Outcome, repository::LeagueRepository,
    service::LeagueService,
};
pub use predictions::repository::PredictionRepository;
pub use shared::{AppError, AppState};
