//! Embedded SQLite implementation of the registration store.
//!
//! Opens (and creates on first use) a single database file and ensures
//! the post-migration `registrations` table exists. Column names match
//! the historical store, so databases produced by earlier service
//! versions open unchanged after the standalone migrator has run.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{RegistrationRow, RegistrationStore, registration_from_row};
use crate::domain::{NewRegistration, Registration};
use crate::error::RegistryError;

/// `CREATE TABLE` statement for the current (post-migration) layout.
const CREATE_TABLE_SQL: &str = "\
    CREATE TABLE IF NOT EXISTS registrations (\n\
        id INTEGER PRIMARY KEY AUTOINCREMENT,\n\
        teamName TEXT,\n\
        playerName TEXT,\n\
        playerMobile TEXT,\n\
        playerEmail TEXT,\n\
        playerRole TEXT,\n\
        screenshot TEXT,\n\
        aadhaar TEXT,\n\
        passport_photo TEXT,\n\
        payment_screenshot TEXT,\n\
        payment_status TEXT DEFAULT 'pending',\n\
        created_at INTEGER\n\
    )";

const SELECT_ALL_SQL: &str = "SELECT id, teamName, playerName, playerMobile, playerEmail, \
     playerRole, screenshot, aadhaar, passport_photo, payment_screenshot, payment_status, \
     created_at FROM registrations ORDER BY id DESC";

const SELECT_ONE_SQL: &str = "SELECT id, teamName, playerName, playerMobile, playerEmail, \
     playerRole, screenshot, aadhaar, passport_photo, payment_screenshot, payment_status, \
     created_at FROM registrations WHERE id = ?";

/// SQLite-backed registration store using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the database file at `path`, creating file and table when
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] when the file cannot be opened or
    /// the table cannot be ensured.
    pub async fn open(path: &Path) -> Result<Self, RegistryError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        sqlx::query(CREATE_TABLE_SQL)
            .execute(&pool)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl RegistrationStore for SqliteStore {
    async fn insert(&self, rec: NewRegistration) -> Result<i64, RegistryError> {
        let rec = rec.normalized();
        let result = sqlx::query(
            "INSERT INTO registrations (\
                 teamName, playerName, playerMobile, playerEmail, playerRole, \
                 screenshot, aadhaar, passport_photo, payment_screenshot, \
                 payment_status, created_at\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
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
        .execute(&self.pool)
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

        Ok(result.last_insert_rowid())
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
        let result = sqlx::query("UPDATE registrations SET payment_status = 'verified' WHERE id = ?")
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
        let result = sqlx::query("UPDATE registrations SET payment_status = 'rejected' WHERE id = ?")
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
        let result = sqlx::query("DELETE FROM registrations WHERE id = ?")
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

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PaymentStatus;
    use tempfile::TempDir;

    async fn open_temp() -> (TempDir, SqliteStore) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir creation failed");
        };
        let path = dir.path().join("registrations.db");
        let Ok(store) = SqliteStore::open(&path).await else {
            panic!("store open failed");
        };
        (dir, store)
    }

    fn sample(name: &str) -> NewRegistration {
        NewRegistration {
            player_name: Some(name.to_string()),
            player_mobile: Some("999".to_string()),
            player_email: Some("a@x.com".to_string()),
            player_role: Some("batter".to_string()),
            passport_photo: Some("/u/p1.jpg".to_string()),
            payment_screenshot: Some("/u/s1.jpg".to_string()),
            ..NewRegistration::default()
        }
    }

    #[tokio::test]
    async fn insert_then_get_roundtrips_with_defaults() {
        let (_dir, store) = open_temp().await;
        let Ok(id) = store.insert(sample("A")).await else {
            panic!("insert failed");
        };
        assert!(id >= 1);

        let Ok(Some(rec)) = store.get_by_id(id).await else {
            panic!("get failed");
        };
        assert_eq!(rec.id, id);
        assert_eq!(rec.player_name.as_deref(), Some("A"));
        assert_eq!(rec.payment_status, PaymentStatus::Pending);
        assert!(rec.created_at > 0);
        assert_eq!(rec.passport_photo.as_deref(), Some("/u/p1.jpg"));
        assert_eq!(rec.payment_screenshot.as_deref(), Some("/u/s1.jpg"));
        assert_eq!(rec.team_name, None);
    }

    #[tokio::test]
    async fn get_missing_id_is_none_not_error() {
        let (_dir, store) = open_temp().await;
        let Ok(found) = store.get_by_id(12345).await else {
            panic!("get failed");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let (_dir, store) = open_temp().await;
        for name in ["A", "B", "C"] {
            let Ok(_) = store.insert(sample(name)).await else {
                panic!("insert failed");
            };
        }
        let Ok(rows) = store.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(rows.len(), 3);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
        assert_eq!(rows.first().and_then(|r| r.player_name.as_deref()), Some("C"));
    }

    #[tokio::test]
    async fn verify_is_visible_and_idempotent() {
        let (_dir, store) = open_temp().await;
        let Ok(id) = store.insert(sample("A")).await else {
            panic!("insert failed");
        };

        assert!(store.mark_verified(id).await.is_ok());
        let Ok(Some(rec)) = store.get_by_id(id).await else {
            panic!("get failed");
        };
        assert_eq!(rec.payment_status, PaymentStatus::Verified);

        // Second call: same end state, no error.
        assert!(store.mark_verified(id).await.is_ok());
        let Ok(Some(rec)) = store.get_by_id(id).await else {
            panic!("get failed");
        };
        assert_eq!(rec.payment_status, PaymentStatus::Verified);
    }

    #[tokio::test]
    async fn reject_overwrites_status() {
        let (_dir, store) = open_temp().await;
        let Ok(id) = store.insert(sample("A")).await else {
            panic!("insert failed");
        };
        assert!(store.mark_rejected(id).await.is_ok());
        let Ok(Some(rec)) = store.get_by_id(id).await else {
            panic!("get failed");
        };
        assert_eq!(rec.payment_status, PaymentStatus::Rejected);
    }

    #[tokio::test]
    async fn status_writes_on_missing_id_surface_not_found() {
        let (_dir, store) = open_temp().await;
        assert!(matches!(
            store.mark_verified(99).await,
            Err(RegistryError::NotFound(99))
        ));
        assert!(matches!(
            store.mark_rejected(99).await,
            Err(RegistryError::NotFound(99))
        ));
        assert!(matches!(
            store.delete_by_id(99).await,
            Err(RegistryError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (_dir, store) = open_temp().await;
        let Ok(id) = store.insert(sample("A")).await else {
            panic!("insert failed");
        };
        assert!(store.delete_by_id(id).await.is_ok());
        let Ok(found) = store.get_by_id(id).await else {
            panic!("get failed");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn ids_are_monotonically_increasing() {
        let (_dir, store) = open_temp().await;
        let Ok(first) = store.insert(sample("A")).await else {
            panic!("insert failed");
        };
        let Ok(second) = store.insert(sample("B")).await else {
            panic!("insert failed");
        };
        assert!(second > first);
    }
}
