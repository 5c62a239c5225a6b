//! `SQLite` implementation of [`RentalStore`].

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use scootrent_app::ports::RentalStore;
use scootrent_domain::error::ScootRentError;
use scootrent_domain::id::{CardId, RentalId, ScooterSerial, UserId};
use scootrent_domain::rental::{Rental, RentalDraft};
use scootrent_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Rental`].
struct Wrapper(Rental);

fn parse_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let scooter_id: i64 = row.try_get("scooter_id")?;
        let user_id: i64 = row.try_get("user_id")?;
        let card: i64 = row.try_get("card")?;
        let started_at: String = row.try_get("started_at")?;
        let ended_at: Option<String> = row.try_get("ended_at")?;
        let amount: Option<f64> = row.try_get("amount")?;

        Ok(Self(Rental {
            id: RentalId::new(id),
            scooter_id: ScooterSerial::new(scooter_id),
            user_id: UserId::new(user_id),
            card: CardId::new(card),
            started_at: parse_timestamp(&started_at)?,
            ended_at: ended_at.as_deref().map(parse_timestamp).transpose()?,
            amount,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO rentals (scooter_id, user_id, card, started_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM rentals WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM rentals ORDER BY id";
const SELECT_BY_USER: &str = "SELECT * FROM rentals WHERE user_id = ? ORDER BY id";
const SELECT_BY_SCOOTER: &str = "SELECT * FROM rentals WHERE scooter_id = ? ORDER BY id";
// The `ended_at IS NULL` guard makes the close atomic: a concurrently closed
// or deleted row changes nothing and reports zero rows.
const CLOSE: &str = "UPDATE rentals SET ended_at = ?, amount = ? WHERE id = ? AND ended_at IS NULL";
const DELETE_BY_ID: &str = "DELETE FROM rentals WHERE id = ?";

/// `SQLite`-backed rental store.
pub struct SqliteRentalStore {
    pool: SqlitePool,
}

impl SqliteRentalStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RentalStore for SqliteRentalStore {
    fn insert(
        &self,
        draft: RentalDraft,
    ) -> impl Future<Output = Result<Rental, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(draft.scooter_id.as_i64())
                .bind(draft.user_id.as_i64())
                .bind(draft.card.as_i64())
                .bind(draft.started_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(draft.into_rental(RentalId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_user(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user.as_i64())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_scooter(
        &self,
        serial: ScooterSerial,
    ) -> impl Future<Output = Result<Vec<Rental>, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SCOOTER)
                .bind(serial.as_i64())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn close(
        &self,
        id: RentalId,
        ended_at: Timestamp,
        amount: f64,
    ) -> impl Future<Output = Result<u64, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(CLOSE)
                .bind(ended_at.to_rfc3339())
                .bind(amount)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }

    fn delete(&self, id: RentalId) -> impl Future<Output = Result<u64, ScootRentError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }
}
