//! One-shot forward schema migration for the embedded store.
//!
//! Runs standalone (see the `migrate` binary), against the same SQLite
//! file the embedded backend will later open, and never concurrently
//! with a running service. Two modes, applied in order:
//!
//! 1. **Additive**: any column in the expected manifest that the table
//!    lacks is added with its own `ALTER TABLE`; column additions are
//!    independent, so one failure is reported and the rest are still
//!    attempted.
//! 2. **Structural**: when deprecated columns are present, the table is
//!    rebuilt without them inside one all-or-nothing transaction
//!    (create new, copy with COALESCE defaults, drop old, rename).
//!
//! Before any mutation the database file is copied to a timestamped
//! backup; a failed copy aborts the run with no schema change. The tool
//! never deletes backups and never creates a store from scratch.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

use crate::error::RegistryError;

/// Columns the current service expects, besides `id`: name → type/default.
const EXPECTED_COLUMNS: &[(&str, &str)] = &[
    ("teamName", "TEXT"),
    ("playerName", "TEXT"),
    ("playerMobile", "TEXT"),
    ("playerEmail", "TEXT"),
    ("playerRole", "TEXT"),
    ("screenshot", "TEXT"),
    ("aadhaar", "TEXT"),
    ("passport_photo", "TEXT"),
    ("payment_screenshot", "TEXT"),
    ("payment_status", "TEXT DEFAULT 'pending'"),
    ("created_at", "INTEGER"),
];

/// Columns dropped by the structural migration. Tolerated when present
/// in older stores, never read or written by current logic.
const DEPRECATED_COLUMNS: &[&str] = &["jerseyNumber", "jerseySize", "category"];

const CREATE_NEW_TABLE_SQL: &str = "\
    CREATE TABLE registrations_new (\n\
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

const COPY_ROWS_SQL: &str = "INSERT INTO registrations_new (id, teamName, playerName, \
     playerMobile, playerEmail, playerRole, screenshot, aadhaar, passport_photo, \
     payment_screenshot, payment_status, created_at) \
     SELECT id, teamName, playerName, playerMobile, playerEmail, playerRole, screenshot, \
     aadhaar, passport_photo, payment_screenshot, COALESCE(payment_status, 'pending'), \
     COALESCE(created_at, ?) FROM registrations";

/// A column the additive mode failed to add. The remaining columns are
/// still attempted; persistent failures are an operator escalation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFailure {
    /// Column name from the expected manifest.
    pub column: String,
    /// The engine's error message.
    pub reason: String,
}

/// What a migration run did.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Where the pre-migration copy of the store was written.
    pub backup_path: PathBuf,
    /// Columns added by the additive mode.
    pub added: Vec<String>,
    /// Columns the additive mode could not add.
    pub failed: Vec<ColumnFailure>,
    /// Deprecated columns dropped by the structural rebuild.
    pub removed: Vec<String>,
}

impl MigrationReport {
    /// `true` when the run changed nothing (the store was already at the
    /// current schema).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.failed.is_empty() && self.removed.is_empty()
    }
}

/// Idempotent forward migrator for one SQLite store file.
#[derive(Debug, Clone)]
pub struct Migrator {
    db_path: PathBuf,
}

impl Migrator {
    /// Creates a migrator targeting the store file at `db_path`.
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Runs both migration modes against the store.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::StoreNotFound`] when the file does not exist.
    /// - [`RegistryError::Backup`] when the pre-mutation copy fails (no
    ///   schema change is attempted).
    /// - [`RegistryError::Write`] when the structural rebuild fails; the
    ///   transaction is rolled back and the original table is untouched.
    /// - [`RegistryError::Read`] when the store cannot be opened or
    ///   inspected.
    pub async fn run(&self) -> Result<MigrationReport, RegistryError> {
        if !self.db_path.exists() {
            return Err(RegistryError::StoreNotFound(self.db_path.clone()));
        }

        let backup_path = self.backup()?;
        tracing::info!(backup = %backup_path.display(), "backup created");

        let options = SqliteConnectOptions::new().filename(&self.db_path);
        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;

        let existing = table_columns(&mut conn).await?;
        tracing::info!(columns = ?existing, "existing columns");

        let (added, failed) = add_missing_columns(&mut conn, &existing).await;

        let deprecated: Vec<String> = existing
            .iter()
            .filter(|c| DEPRECATED_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect();
        let removed = if deprecated.is_empty() {
            Vec::new()
        } else {
            rebuild_without_deprecated(&mut conn).await?;
            deprecated
        };

        let report = MigrationReport {
            backup_path,
            added,
            failed,
            removed,
        };
        Ok(report)
    }

    /// Copies the store file to `<path>.bak.<epoch-ms>`, bumping the
    /// suffix if a backup from the same millisecond already exists.
    fn backup(&self) -> Result<PathBuf, RegistryError> {
        let mut stamp = Utc::now().timestamp_millis();
        let backup_path = loop {
            let candidate = PathBuf::from(format!("{}.bak.{stamp}", self.db_path.display()));
            if !candidate.exists() {
                break candidate;
            }
            stamp += 1;
        };

        std::fs::copy(&self.db_path, &backup_path)
            .map_err(|e| RegistryError::Backup(e.to_string()))?;
        Ok(backup_path)
    }
}

/// Reads the current column names of the `registrations` table. An
/// empty result means the table does not exist yet.
async fn table_columns(conn: &mut SqliteConnection) -> Result<Vec<String>, RegistryError> {
    sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info('registrations')")
        .fetch_all(conn)
        .await
        .map_err(|e| RegistryError::Read(e.to_string()))
}

/// Additive mode: one independent `ALTER TABLE` per missing column.
async fn add_missing_columns(
    conn: &mut SqliteConnection,
    existing: &[String],
) -> (Vec<String>, Vec<ColumnFailure>) {
    let mut added = Vec::new();
    let mut failed = Vec::new();

    for (column, definition) in EXPECTED_COLUMNS {
        if existing.iter().any(|c| c == column) {
            continue;
        }
        let sql = format!("ALTER TABLE registrations ADD COLUMN {column} {definition}");
        match sqlx::query(&sql).execute(&mut *conn).await {
            Ok(_) => {
                tracing::info!(column, "column added");
                added.push((*column).to_string());
            }
            Err(e) => {
                tracing::warn!(column, error = %e, "failed to add column");
                failed.push(ColumnFailure {
                    column: (*column).to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (added, failed)
}

/// Structural mode: transactional table rebuild without the deprecated
/// columns. Any failure rolls the whole transaction back.
async fn rebuild_without_deprecated(conn: &mut SqliteConnection) -> Result<(), RegistryError> {
    let now_ms = Utc::now().timestamp_millis();

    let mut tx = conn
        .begin()
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    sqlx::query(CREATE_NEW_TABLE_SQL)
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    sqlx::query(COPY_ROWS_SQL)
        .bind(now_ms)
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    sqlx::query("DROP TABLE registrations")
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    sqlx::query("ALTER TABLE registrations_new RENAME TO registrations")
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| RegistryError::Write(e.to_string()))?;

    tracing::info!("structural migration committed");
    Ok(())
}

/// `true` when `path` looks like a backup produced by [`Migrator`].
#[must_use]
pub fn is_backup_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains(".bak."))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seed_legacy_db(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("registrations.db");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let Ok(mut conn) = SqliteConnection::connect_with(&options).await else {
            panic!("seed connect failed");
        };

        // Old schema: missing newer columns, still carrying jersey fields.
        let Ok(_) = sqlx::query(
            "CREATE TABLE registrations (\
                 id INTEGER PRIMARY KEY AUTOINCREMENT,\
                 playerName TEXT,\
                 playerMobile TEXT,\
                 screenshot TEXT,\
                 aadhaar TEXT,\
                 jerseyNumber TEXT,\
                 jerseySize TEXT,\
                 category TEXT\
             )",
        )
        .execute(&mut conn)
        .await
        else {
            panic!("seed create failed");
        };

        let Ok(_) = sqlx::query(
            "INSERT INTO registrations (playerName, playerMobile, jerseyNumber) \
             VALUES ('A', '999', '7'), ('B', '888', '10')",
        )
        .execute(&mut conn)
        .await
        else {
            panic!("seed insert failed");
        };

        let Ok(_) = conn.close().await else {
            panic!("seed close failed");
        };
        path
    }

    async fn columns_of(path: &PathBuf) -> Vec<String> {
        let options = SqliteConnectOptions::new().filename(path);
        let Ok(mut conn) = SqliteConnection::connect_with(&options).await else {
            panic!("connect failed");
        };
        let Ok(cols) = table_columns(&mut conn).await else {
            panic!("table_info failed");
        };
        cols
    }

    #[tokio::test]
    async fn missing_store_is_store_not_found() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let migrator = Migrator::new(dir.path().join("absent.db"));
        assert!(matches!(
            migrator.run().await,
            Err(RegistryError::StoreNotFound(_))
        ));
    }

    #[tokio::test]
    async fn backup_is_byte_identical_to_pre_run_state() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = seed_legacy_db(&dir).await;
        let Ok(before) = std::fs::read(&path) else {
            panic!("read failed");
        };

        let Ok(report) = Migrator::new(&path).run().await else {
            panic!("migration failed");
        };
        let Ok(backup) = std::fs::read(&report.backup_path) else {
            panic!("backup read failed");
        };
        assert_eq!(before, backup);
        assert!(is_backup_file(&report.backup_path));
    }

    #[tokio::test]
    async fn adds_missing_and_drops_deprecated_columns() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = seed_legacy_db(&dir).await;

        let Ok(report) = Migrator::new(&path).run().await else {
            panic!("migration failed");
        };
        assert!(report.failed.is_empty());
        assert!(report.added.iter().any(|c| c == "payment_status"));
        assert!(report.added.iter().any(|c| c == "passport_photo"));
        let removed: Vec<&str> = report.removed.iter().map(String::as_str).collect();
        assert_eq!(removed, vec!["jerseyNumber", "jerseySize", "category"]);

        let cols = columns_of(&path).await;
        for (expected, _) in EXPECTED_COLUMNS {
            assert!(cols.iter().any(|c| c == expected), "missing {expected}");
        }
        for deprecated in DEPRECATED_COLUMNS {
            assert!(!cols.iter().any(|c| c == deprecated), "kept {deprecated}");
        }
    }

    #[tokio::test]
    async fn rows_survive_structural_rebuild_with_defaults() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = seed_legacy_db(&dir).await;
        let Ok(_) = Migrator::new(&path).run().await else {
            panic!("migration failed");
        };

        let options = SqliteConnectOptions::new().filename(&path);
        let Ok(mut conn) = SqliteConnection::connect_with(&options).await else {
            panic!("connect failed");
        };
        let Ok(rows) = sqlx::query_as::<_, (i64, Option<String>, Option<String>, Option<i64>)>(
            "SELECT id, playerName, payment_status, created_at FROM registrations ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        else {
            panic!("select failed");
        };

        assert_eq!(rows.len(), 2);
        let Some((first_id, first_name, first_status, first_created)) = rows.first().cloned()
        else {
            panic!("row missing");
        };
        assert_eq!(first_id, 1);
        assert_eq!(first_name.as_deref(), Some("A"));
        assert_eq!(first_status.as_deref(), Some("pending"));
        assert!(first_created.is_some_and(|t| t > 0));
    }

    #[tokio::test]
    async fn second_run_is_a_noop_with_a_fresh_backup() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = seed_legacy_db(&dir).await;

        let Ok(first) = Migrator::new(&path).run().await else {
            panic!("first run failed");
        };
        let Ok(second) = Migrator::new(&path).run().await else {
            panic!("second run failed");
        };

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_ne!(first.backup_path, second.backup_path);
        assert!(first.backup_path.exists());
        assert!(second.backup_path.exists());
    }
}
