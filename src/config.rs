//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Backend selection happens here, once,
//! at startup: when `DATABASE_URL` is present the remote PostgreSQL backend
//! is used, otherwise the embedded SQLite store. No other part of the
//! service inspects the environment to decide which backend it talks to.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Which physical store backs the registration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Remote PostgreSQL service reached over the network.
    Remote {
        /// PostgreSQL connection string.
        url: String,
        /// Maximum number of connections in the pool.
        max_connections: u32,
        /// Minimum idle connections in the pool.
        min_connections: u32,
        /// Timeout in seconds for acquiring a connection.
        connect_timeout_secs: u64,
    },
    /// Embedded SQLite database on local disk.
    Embedded {
        /// Path to the SQLite database file.
        path: PathBuf,
    },
}

impl BackendConfig {
    /// Selects the backend from the resolved configuration values.
    ///
    /// Presence of a remote connection string wins; otherwise the
    /// embedded store at `sqlite_path` is used. Pure function so the
    /// selection rule is testable without touching process env.
    #[must_use]
    pub fn select(
        database_url: Option<String>,
        sqlite_path: PathBuf,
        max_connections: u32,
        min_connections: u32,
        connect_timeout_secs: u64,
    ) -> Self {
        match database_url {
            Some(url) if !url.trim().is_empty() => Self::Remote {
                url,
                max_connections,
                min_connections,
                connect_timeout_secs,
            },
            _ => Self::Embedded { path: sqlite_path },
        }
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Storage backend selected at startup.
    pub backend: BackendConfig,

    /// Directory holding uploaded evidence files.
    pub uploads_dir: PathBuf,

    /// Webhook URL for verification notifications. `None` disables
    /// notification delivery entirely (verify still succeeds and reports
    /// the notification as skipped).
    pub notify_webhook_url: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let database_url = std::env::var("DATABASE_URL").ok();
        let sqlite_path = PathBuf::from(
            std::env::var("SQLITE_PATH").unwrap_or_else(|_| "registrations.db".to_string()),
        );

        let max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 10);
        let min_connections = parse_env("DATABASE_MIN_CONNECTIONS", 2);
        let connect_timeout_secs = parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5);

        let backend = BackendConfig::select(
            database_url,
            sqlite_path,
            max_connections,
            min_connections,
            connect_timeout_secs,
        );

        let uploads_dir = PathBuf::from(
            std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
        );

        let notify_webhook_url = std::env::var("NOTIFY_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            listen_addr,
            backend,
            uploads_dir,
            notify_webhook_url,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_selected_when_url_present() {
        let backend = BackendConfig::select(
            Some("postgres://reg:reg@db/registrations".to_string()),
            PathBuf::from("registrations.db"),
            10,
            2,
            5,
        );
        assert!(matches!(backend, BackendConfig::Remote { .. }));
    }

    #[test]
    fn embedded_selected_when_url_absent() {
        let backend = BackendConfig::select(None, PathBuf::from("registrations.db"), 10, 2, 5);
        assert_eq!(
            backend,
            BackendConfig::Embedded {
                path: PathBuf::from("registrations.db")
            }
        );
    }

    #[test]
    fn blank_url_counts_as_absent() {
        let backend =
            BackendConfig::select(Some("   ".to_string()), PathBuf::from("reg.db"), 10, 2, 5);
        assert!(matches!(backend, BackendConfig::Embedded { .. }));
    }
}
