// Public API - what other modules can use
pub use handlers::{
    get_active_users, get_hit_ratio, get_matchday_distribution, get_matchday_predictions,
    get_overview, get_top_users,
};

// Internal modules
pub mod activity;
mod handlers;
pub mod hits;
pub mod models;
pub mod service;
pub mod types;
