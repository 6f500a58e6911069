use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{NewRecord, Prize, RecordUpdate, RegistrationRecord};
use crate::shared::AppError;

/// Trait over the registration document collection. The service layer
/// only relies on equality filters and a single newest-first sort,
/// so any document store can sit behind this.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Creates one record; the store assigns id and timestamp
    async fn create(&self, record: &NewRecord) -> Result<RegistrationRecord, AppError>;

    /// All records, newest first
    async fn get_all(&self) -> Result<Vec<RegistrationRecord>, AppError>;

    /// Number of records held by a phone across all games
    async fn count_by_phone(&self, phone: &str) -> Result<usize, AppError>;

    /// Whether any record exists for this (phone, game) pair
    async fn exists_for_phone_and_game(&self, phone: &str, game: &str) -> Result<bool, AppError>;

    /// Overwrites score and prize on a single record
    async fn update_score_prize(&self, id: &str, score: i64, prize: Prize)
        -> Result<(), AppError>;

    /// Overwrites the prize alone, leaving the score untouched
    async fn update_prize(&self, id: &str, prize: Prize) -> Result<(), AppError>;

    /// Replaces the editable fields of a single record
    async fn update_fields(&self, id: &str, update: &RecordUpdate) -> Result<(), AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// In-memory implementation for development and testing. Insertion
/// order stands in for the store's write timestamps; reads reverse it
/// so callers see newest first, like the production store.
pub struct InMemoryRegistrationRepository {
    records: Mutex<Vec<RegistrationRecord>>,
}

impl Default for InMemoryRegistrationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Current number of stored records (useful in tests)
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Fetches one record by id (useful in tests)
    pub fn get(&self, id: &str) -> Option<RegistrationRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    #[instrument(skip(self, record))]
    async fn create(&self, record: &NewRecord) -> Result<RegistrationRecord, AppError> {
        let stored = RegistrationRecord {
            id: Uuid::new_v4().to_string(),
            name: record.name.clone(),
            designation: record.designation.clone(),
            phone: record.phone.clone(),
            game: record.game.clone(),
            team_name: record.team_name.clone(),
            score: 0,
            prize: Prize::None,
            created_at: Utc::now(),
        };

        debug!(id = %stored.id, game = %stored.game, "Creating registration in memory");
        self.records.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<RegistrationRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().rev().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn count_by_phone(&self, phone: &str) -> Result<usize, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.phone == phone).count())
    }

    #[instrument(skip(self))]
    async fn exists_for_phone_and_game(&self, phone: &str, game: &str) -> Result<bool, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().any(|r| r.phone == phone && r.game == game))
    }

    #[instrument(skip(self))]
    async fn update_score_prize(
        &self,
        id: &str,
        score: i64,
        prize: Prize,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.score = score;
                record.prize = prize;
                Ok(())
            }
            None => {
                warn!(id = %id, "Registration not found for score update");
                Err(AppError::NotFound("Registration not found".to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn update_prize(&self, id: &str, prize: Prize) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.prize = prize;
                Ok(())
            }
            None => {
                warn!(id = %id, "Registration not found for prize update");
                Err(AppError::NotFound("Registration not found".to_string()))
            }
        }
    }

    #[instrument(skip(self, update))]
    async fn update_fields(&self, id: &str, update: &RecordUpdate) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.name = update.name.clone();
                record.designation = update.designation.clone();
                record.phone = update.phone.clone();
                record.game = update.game.clone();
                record.team_name = update.team_name.clone();
                Ok(())
            }
            None => {
                warn!(id = %id, "Registration not found for field update");
                Err(AppError::NotFound("Registration not found".to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            warn!(id = %id, "Registration not found for deletion");
            return Err(AppError::NotFound("Registration not found".to_string()));
        }
        Ok(())
    }
}

/// PostgreSQL implementation backing the production deployment
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::postgres::PgRow) -> RegistrationRecord {
        let prize: String = row.get("prize");
        RegistrationRecord {
            id: row.get("id"),
            name: row.get("name"),
            designation: row.get("designation"),
            phone: row.get("phone"),
            game: row.get("game"),
            team_name: row.get("team_name"),
            score: row.get("score"),
            prize: Prize::from_str(&prize).unwrap_or_default(),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    #[instrument(skip(self, record))]
    async fn create(&self, record: &NewRecord) -> Result<RegistrationRecord, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        sqlx::query(
            "INSERT INTO registrations (id, name, designation, phone, game, team_name, score, prize, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, 0, 'NONE', $7)",
        )
        .bind(&id)
        .bind(&record.name)
        .bind(&record.designation)
        .bind(&record.phone)
        .bind(&record.game)
        .bind(&record.team_name)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create registration in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(RegistrationRecord {
            id,
            name: record.name.clone(),
            designation: record.designation.clone(),
            phone: record.phone.clone(),
            game: record.game.clone(),
            team_name: record.team_name.clone(),
            score: 0,
            prize: Prize::None,
            created_at,
        })
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<RegistrationRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, designation, phone, game, team_name, score, prize, created_at \
             FROM registrations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch registrations from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_phone(&self, phone: &str) -> Result<usize, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE phone = $1")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count registrations by phone");
                AppError::DatabaseError(e.to_string())
            })?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    #[instrument(skip(self))]
    async fn exists_for_phone_and_game(&self, phone: &str, game: &str) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE phone = $1 AND game = $2) AS present",
        )
        .bind(phone)
        .bind(game)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to check registration existence");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.get("present"))
    }

    #[instrument(skip(self))]
    async fn update_score_prize(
        &self,
        id: &str,
        score: i64,
        prize: Prize,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE registrations SET score = $2, prize = $3 WHERE id = $1")
            .bind(id)
            .bind(score)
            .bind(prize.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, id = %id, "Failed to update score in database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_prize(&self, id: &str, prize: Prize) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE registrations SET prize = $2 WHERE id = $1")
            .bind(id)
            .bind(prize.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, id = %id, "Failed to update prize in database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self, update))]
    async fn update_fields(&self, id: &str, update: &RecordUpdate) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE registrations SET name = $2, designation = $3, phone = $4, game = $5, team_name = $6 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.designation)
        .bind(&update.phone)
        .bind(&update.game)
        .bind(&update.team_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, id = %id, "Failed to update registration in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, id = %id, "Failed to delete registration from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".to_string()));
        }
        Ok(())
    }
}
