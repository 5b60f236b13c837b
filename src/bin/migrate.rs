//! Standalone forward-migration tool for the embedded store.
//!
//! Usage: `migrate [path-to-db]` — falls back to `SQLITE_PATH`, then
//! `registrations.db`. Must not run concurrently with a service using
//! the same file. Exits non-zero when the store is missing, the backup
//! cannot be made, or the structural rebuild fails (in which case the
//! transaction was rolled back and the original table is untouched).

use tracing_subscriber::EnvFilter;

use tourney_registry::persistence::migrate::Migrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        std::env::var("SQLITE_PATH").unwrap_or_else(|_| "registrations.db".to_string())
    });
    tracing::info!(%path, "running schema migration");

    let report = Migrator::new(path.as_str()).run().await?;

    if report.is_noop() {
        tracing::info!("store already at current schema; nothing to do");
    }
    for column in &report.added {
        tracing::info!(%column, "added column");
    }
    for failure in &report.failed {
        tracing::warn!(
            column = %failure.column,
            reason = %failure.reason,
            "column could not be added; escalate to operator"
        );
    }
    if !report.removed.is_empty() {
        tracing::info!(removed = ?report.removed, "dropped deprecated columns");
    }
    tracing::info!(backup = %report.backup_path.display(), "backup retained");

    Ok(())
}
