use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{
    sort_chronologically, ClassificationRecord, JackpotEntry, MatchResult, Matchday,
    MatchdayWinner, Team,
};
use crate::shared::AppError;

/// Store access for league facts (matchdays, teams, results) and the
/// standings, winners and jackpot derived from them.
///
/// Reads return `Ok(None)` or an empty `Vec` when nothing is stored yet;
/// `Err` is reserved for the store itself failing.
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn upsert_matchdays(&self, matchdays: &[Matchday]) -> Result<(), AppError>;
    /// Matchdays in chronological order
    async fn list_matchdays(&self) -> Result<Vec<Matchday>, AppError>;

    async fn upsert_teams(&self, teams: &[Team]) -> Result<(), AppError>;
    async fn list_teams(&self) -> Result<Vec<Team>, AppError>;

    /// Replaces the whole results table
    async fn replace_results(&self, results: &[MatchResult]) -> Result<(), AppError>;
    async fn list_results(&self) -> Result<Vec<MatchResult>, AppError>;
    async fn list_results_for_matchday(&self, matchday: &str)
        -> Result<Vec<MatchResult>, AppError>;

    // Derived tables are rebuilt on every refresh, so writes replace them whole

    async fn replace_classification(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<(), AppError>;
    /// Standings ordered by position
    async fn list_classification(&self) -> Result<Vec<ClassificationRecord>, AppError>;

    async fn replace_winners(&self, winners: &[MatchdayWinner]) -> Result<(), AppError>;
    async fn list_winners(&self, matchday: &str) -> Result<Vec<MatchdayWinner>, AppError>;

    async fn replace_jackpot(&self, entries: &[JackpotEntry]) -> Result<(), AppError>;
    async fn get_jackpot(&self, matchday: &str) -> Result<Option<JackpotEntry>, AppError>;
}

#[derive(Debug, Default)]
struct LeagueTables {
    matchdays: BTreeMap<String, Matchday>,
    teams: BTreeMap<String, Team>,
    results: Vec<MatchResult>,
    classification: BTreeMap<String, ClassificationRecord>,
    winners: BTreeSet<(String, String)>,
    jackpot: BTreeMap<String, JackpotEntry>,
}

/// In-memory implementation of LeagueRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryLeagueRepository {
    tables: RwLock<LeagueTables>,
}

impl InMemoryLeagueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeagueRepository for InMemoryLeagueRepository {
    #[instrument(skip(self, matchdays), fields(count = matchdays.len()))]
    async fn upsert_matchdays(&self, matchdays: &[Matchday]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        for matchday in matchdays {
            tables
                .matchdays
                .insert(matchday.number.clone(), matchday.clone());
        }
        debug!("Matchdays upserted in memory");
        Ok(())
    }

    async fn list_matchdays(&self) -> Result<Vec<Matchday>, AppError> {
        let tables = self.tables.read().await;
        let mut matchdays: Vec<Matchday> = tables.matchdays.values().cloned().collect();
        sort_chronologically(&mut matchdays);
        Ok(matchdays)
    }

    #[instrument(skip(self, teams), fields(count = teams.len()))]
    async fn upsert_teams(&self, teams: &[Team]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        for team in teams {
            tables.teams.insert(team.name.clone(), team.clone());
        }
        debug!("Teams upserted in memory");
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.teams.values().cloned().collect())
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn replace_results(&self, results: &[MatchResult]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.results = results.to_vec();
        debug!("Results replaced in memory");
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<MatchResult>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.results.clone())
    }

    async fn list_results_for_matchday(
        &self,
        matchday: &str,
    ) -> Result<Vec<MatchResult>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .results
            .iter()
            .filter(|r| r.matchday == matchday)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn replace_classification(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.classification = records
            .iter()
            .map(|record| (record.team.clone(), record.clone()))
            .collect();
        debug!("Classification replaced in memory");
        Ok(())
    }

    async fn list_classification(&self) -> Result<Vec<ClassificationRecord>, AppError> {
        let tables = self.tables.read().await;
        let mut records: Vec<ClassificationRecord> =
            tables.classification.values().cloned().collect();
        records.sort_by_key(|r| r.position);
        Ok(records)
    }

    #[instrument(skip(self, winners), fields(count = winners.len()))]
    async fn replace_winners(&self, winners: &[MatchdayWinner]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.winners = winners
            .iter()
            .map(|w| (w.matchday.clone(), w.username.clone()))
            .collect();
        Ok(())
    }

    async fn list_winners(&self, matchday: &str) -> Result<Vec<MatchdayWinner>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .winners
            .iter()
            .filter(|(day, _)| day == matchday)
            .map(|(day, username)| MatchdayWinner {
                username: username.clone(),
                matchday: day.clone(),
            })
            .collect())
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn replace_jackpot(&self, entries: &[JackpotEntry]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.jackpot = entries
            .iter()
            .map(|entry| (entry.matchday.clone(), entry.clone()))
            .collect();
        Ok(())
    }

    async fn get_jackpot(&self, matchday: &str) -> Result<Option<JackpotEntry>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.jackpot.get(matchday).cloned())
    }
}

/// PostgreSQL implementation backed by the hosted league database
pub struct PostgresLeagueRepository {
    pool: PgPool,
}

impl PostgresLeagueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        warn!(error = %e, operation, "League query failed");
        AppError::DatabaseError(e.to_string())
    }
}

fn goals_to_db(goals: Option<u32>) -> Option<i32> {
    goals.and_then(|g| i32::try_from(g).ok())
}

fn goals_from_db(goals: Option<i32>) -> Option<u32> {
    goals.and_then(|g| u32::try_from(g).ok())
}

fn count_to_db(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn count_from_db(count: i32) -> u32 {
    u32::try_from(count).unwrap_or_default()
}

#[async_trait]
impl LeagueRepository for PostgresLeagueRepository {
    #[instrument(skip(self, matchdays), fields(count = matchdays.len()))]
    async fn upsert_matchdays(&self, matchdays: &[Matchday]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("upsert_matchdays"))?;

        for matchday in matchdays {
            sqlx::query(
                "INSERT INTO matchdays (number, date) VALUES ($1, $2) \
                 ON CONFLICT (number) DO UPDATE SET date = EXCLUDED.date",
            )
            .bind(&matchday.number)
            .bind(matchday.date)
            .execute(&mut *tx)
            .await
            .map_err(database_error("upsert_matchdays"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("upsert_matchdays"))?;
        debug!("Matchdays upserted in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_matchdays(&self) -> Result<Vec<Matchday>, AppError> {
        let rows = sqlx::query("SELECT number, date FROM matchdays")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("list_matchdays"))?;

        let mut matchdays: Vec<Matchday> = rows
            .iter()
            .map(|row| Matchday {
                number: row.get("number"),
                date: row.get("date"),
            })
            .collect();
        sort_chronologically(&mut matchdays);
        Ok(matchdays)
    }

    #[instrument(skip(self, teams), fields(count = teams.len()))]
    async fn upsert_teams(&self, teams: &[Team]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("upsert_teams"))?;

        for team in teams {
            sqlx::query(
                "INSERT INTO teams (name, logo) VALUES ($1, $2) \
                 ON CONFLICT (name) DO UPDATE SET logo = EXCLUDED.logo",
            )
            .bind(&team.name)
            .bind(&team.logo)
            .execute(&mut *tx)
            .await
            .map_err(database_error("upsert_teams"))?;
        }

        tx.commit().await.map_err(database_error("upsert_teams"))?;
        debug!("Teams upserted in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query("SELECT name, logo FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("list_teams"))?;

        Ok(rows
            .iter()
            .map(|row| Team {
                name: row.get("name"),
                logo: row.get("logo"),
            })
            .collect())
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn replace_results(&self, results: &[MatchResult]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("replace_results"))?;

        sqlx::query("DELETE FROM results")
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_results"))?;

        for result in results {
            sqlx::query(
                "INSERT INTO results \
                 (matchday, home_team, away_team, home_goals, away_goals, result) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&result.matchday)
            .bind(&result.home_team)
            .bind(&result.away_team)
            .bind(goals_to_db(result.home_goals))
            .bind(goals_to_db(result.away_goals))
            .bind(result.outcome().map(|o| o.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_results"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("replace_results"))?;
        debug!("Results replaced in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_results(&self) -> Result<Vec<MatchResult>, AppError> {
        let rows = sqlx::query(
            "SELECT matchday, home_team, away_team, home_goals, away_goals FROM results",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("list_results"))?;

        Ok(rows.iter().map(result_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn list_results_for_matchday(
        &self,
        matchday: &str,
    ) -> Result<Vec<MatchResult>, AppError> {
        let rows = sqlx::query(
            "SELECT matchday, home_team, away_team, home_goals, away_goals FROM results \
             WHERE matchday = $1",
        )
        .bind(matchday)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("list_results_for_matchday"))?;

        Ok(rows.iter().map(result_from_row).collect())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn replace_classification(
        &self,
        records: &[ClassificationRecord],
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("replace_classification"))?;

        sqlx::query("DELETE FROM classification")
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_classification"))?;

        for record in records {
            sqlx::query(
                "INSERT INTO classification (name, position, avg_points, total_points, \
                 games_played, home_points_ratio, away_points_ratio, avg_goals_favor, \
                 avg_goals_against) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(&record.team)
            .bind(count_to_db(record.position))
            .bind(record.avg_points)
            .bind(count_to_db(record.total_points))
            .bind(count_to_db(record.games_played))
            .bind(record.home_points_ratio)
            .bind(record.away_points_ratio)
            .bind(record.avg_goals_for)
            .bind(record.avg_goals_against)
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_classification"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("replace_classification"))?;
        debug!("Classification replaced in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_classification(&self) -> Result<Vec<ClassificationRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT name, position, avg_points, total_points, games_played, home_points_ratio, \
             away_points_ratio, avg_goals_favor, avg_goals_against FROM classification \
             ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("list_classification"))?;

        Ok(rows
            .iter()
            .map(|row| ClassificationRecord {
                team: row.get("name"),
                position: count_from_db(row.get("position")),
                avg_points: row.get("avg_points"),
                total_points: count_from_db(row.get("total_points")),
                games_played: count_from_db(row.get("games_played")),
                home_points_ratio: row.get("home_points_ratio"),
                away_points_ratio: row.get("away_points_ratio"),
                avg_goals_for: row.get("avg_goals_favor"),
                avg_goals_against: row.get("avg_goals_against"),
            })
            .collect())
    }

    #[instrument(skip(self, winners), fields(count = winners.len()))]
    async fn replace_winners(&self, winners: &[MatchdayWinner]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("replace_winners"))?;

        sqlx::query("DELETE FROM matchday_winners")
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_winners"))?;

        for winner in winners {
            sqlx::query("INSERT INTO matchday_winners (username, matchday) VALUES ($1, $2)")
                .bind(&winner.username)
                .bind(&winner.matchday)
                .execute(&mut *tx)
                .await
                .map_err(database_error("replace_winners"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("replace_winners"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_winners(&self, matchday: &str) -> Result<Vec<MatchdayWinner>, AppError> {
        let rows = sqlx::query(
            "SELECT username, matchday FROM matchday_winners WHERE matchday = $1 ORDER BY username",
        )
        .bind(matchday)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("list_winners"))?;

        Ok(rows
            .iter()
            .map(|row| MatchdayWinner {
                username: row.get("username"),
                matchday: row.get("matchday"),
            })
            .collect())
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn replace_jackpot(&self, entries: &[JackpotEntry]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("replace_jackpot"))?;

        sqlx::query("DELETE FROM jackpot")
            .execute(&mut *tx)
            .await
            .map_err(database_error("replace_jackpot"))?;

        for entry in entries {
            sqlx::query("INSERT INTO jackpot (matchday, accumulated) VALUES ($1, $2)")
                .bind(&entry.matchday)
                .bind(entry.accumulated)
                .execute(&mut *tx)
                .await
                .map_err(database_error("replace_jackpot"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("replace_jackpot"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_jackpot(&self, matchday: &str) -> Result<Option<JackpotEntry>, AppError> {
        let row = sqlx::query("SELECT matchday, accumulated FROM jackpot WHERE matchday = $1")
            .bind(matchday)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("get_jackpot"))?;

        Ok(row.map(|row| JackpotEntry {
            matchday: row.get("matchday"),
            accumulated: row.get("accumulated"),
        }))
    }
}

fn result_from_row(row: &sqlx::postgres::PgRow) -> MatchResult {
    MatchResult {
        matchday: row.get("matchday"),
        home_team: row.get("home_team"),
        away_team: row.get("away_team"),
        home_goals: goals_from_db(row.get("home_goals")),
        away_goals: goals_from_db(row.get("away_goals")),
    }
}
