// Public API - what other modules can use
pub use handlers::{
    get_classification, get_last_matchday, get_matchday_jackpot, get_matchday_matches,
    get_matchday_winners, get_next_matchday, refresh,
};

// Internal modules
mod handlers;
pub mod jackpot;
pub mod models;
pub mod outcome;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod standings;
pub mod types;
pub mod winners;
