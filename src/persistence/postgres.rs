//! Remote PostgreSQL implementation of the registration store.
//!
//! Reaches the managed relational service over `sqlx::PgPool`. The
//! historical schema used case-sensitive camelCase column names, so the
//! identifiers are quoted in every statement. The service's native
//! "no rows" signal is mapped to the same not-found contract as the
//! embedded backend (an empty `Option`, or [`RegistryError::NotFound`]
//! for the write operations).

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{RegistrationRow, RegistrationStore, registration_from_row};
use crate::domain::{NewRegistration, Registration};
use crate::error::RegistryError;

const SELECT_ALL_SQL: &str = "SELECT id, \"teamName\", \"playerName\", \"playerMobile\", \
     \"playerEmail\", \"playerRole\", screenshot, aadhaar, passport_photo, payment_screenshot, \
     payment_status, created_at FROM registrations ORDER BY id DESC";

const SELECT_ONE_SQL: &str = "SELECT id, \"teamName\", \"playerName\", \"playerMobile\", \
     \"playerEmail\", \"playerRole\", screenshot, aadhaar, passport_photo, payment_screenshot, \
     payment_status, created_at FROM registrations WHERE id = $1";

const INSERT_SQL: &str = "INSERT INTO registrations (\"teamName\", \"playerName\", \
     \"playerMobile\", \"playerEmail\", \"playerRole\", screenshot, aadhaar, passport_photo, \
     payment_screenshot, payment_status, created_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id";

/// PostgreSQL-backed registration store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Establishes the connection pool against the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] when the pool cannot be
    /// established within the configured acquire timeout.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, RegistryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl RegistrationStore for PostgresStore {
    async fn insert(&self, rec: NewRegistration) -> Result<i64, RegistryError> {
        let rec = rec.normalized();
        let id = sqlx::query_scalar::<_, i64>(INSERT_SQL)
            .bind(rec.team_name)
            .bind(rec.player_name)
            .bind(rec.player_mobile)
            .bind(rec.player_email)
            .bind(rec.player_role)
            .bind(rec.screenshot)
            .bind(rec.aadhaar)
            .bind(rec.passport_photo)
            .bind(rec.payment_screenshot)
            .bind(rec.payment_status.as_str())
            .bind(rec.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RegistryError::Write(e.to_string()))?;

        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Registration>, RegistryError> {
        let rows = sqlx::query_as::<_, RegistrationRow>(SELECT_ALL_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        Ok(rows.into_iter().map(registration_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Registration>, RegistryError> {
        let row = sqlx::query_as::<_, RegistrationRow>(SELECT_ONE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        Ok(row.map(registration_from_row))
    }

    async fn mark_verified(&self, id: i64) -> Result<(), RegistryError> {
        let result =
            sqlx::query("UPDATE registrations SET payment_status = 'verified' WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| RegistryError::Write(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::NotFound(id));
        }
        Ok(())
    }

    async fn mark_rejected(&self, id: i64) -> Result<(), RegistryError> {
        let result =
            sqlx::query("UPDATE registrations SET payment_status = 'rejected' WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| RegistryError::Write(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RegistryError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RegistryError::Write(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::NotFound(id));
        }
        Ok(())
    }
}
