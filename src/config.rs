use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::league::jackpot::{JackpotPolicy, JackpotReset};
use crate::shared::AppError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CALENDAR_PATH: &str = "data/futbolcalendar/futsal_calendar.json";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the hosted PostgreSQL database
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    #[instrument(skip(self), fields(max_connections = self.max_connections))]
    pub async fn connect(&self) -> Result<PgPool, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to database");
                AppError::DatabaseError(e.to_string())
            })?;

        info!("Connected to database");
        Ok(pool)
    }
}

/// Application configuration, read once at startup and passed to constructors
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` selects the in-memory repositories
    pub database: Option<DatabaseConfig>,
    pub bind_addr: String,
    pub calendar_path: PathBuf,
    pub jackpot: JackpotPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            calendar_path: PathBuf::from(DEFAULT_CALENDAR_PATH),
            jackpot: JackpotPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, loading `.env` first when one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!(error = %e, "Failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => parse_number("DATABASE_MAX_CONNECTIONS", &raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections,
            });

        let unit = match lookup("JACKPOT_UNIT") {
            Some(raw) => parse_number("JACKPOT_UNIT", &raw)?,
            None => defaults.jackpot.unit,
        };

        let reset = match lookup("JACKPOT_RESET") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "unit" => JackpotReset::Unit,
                "zero" => JackpotReset::Zero,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "JACKPOT_RESET",
                        value: raw,
                    })
                }
            },
            None => defaults.jackpot.reset,
        };

        Ok(Self {
            database,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            calendar_path: lookup("CALENDAR_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.calendar_path),
            jackpot: JackpotPolicy { unit, reset },
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
