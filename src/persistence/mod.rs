//! Persistence layer: one registration-store contract, two backends.
//!
//! [`RegistrationStore`] is implemented once against a remote PostgreSQL
//! service ([`postgres::PostgresStore`]) and once against an embedded
//! SQLite database ([`sqlite::SqliteStore`]). Both implementations map
//! their native failure signals onto the shared [`RegistryError`]
//! taxonomy and behave identically for every operation; callers cannot
//! tell them apart. The backend is chosen exactly once, at process
//! start, via [`connect`].
//!
//! Policy note: `mark_verified`, `mark_rejected` and `delete_by_id` on a
//! non-existent id surface [`RegistryError::NotFound`] on both backends
//! (zero affected rows is never a silent no-op).

pub mod migrate;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use crate::config::BackendConfig;
use crate::domain::{NewRegistration, PaymentStatus, Registration};
use crate::error::RegistryError;

/// Raw row shape shared by both backends: the twelve `registrations`
/// columns in declaration order, with legacy-nullable status/timestamp.
pub(crate) type RegistrationRow = (
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
);

/// Builds a [`Registration`] from a raw row, coalescing legacy `NULL`s
/// in `payment_status` and `created_at` to their defaults.
pub(crate) fn registration_from_row(row: RegistrationRow) -> Registration {
    let (
        id,
        team_name,
        player_name,
        player_mobile,
        player_email,
        player_role,
        screenshot,
        aadhaar,
        passport_photo,
        payment_screenshot,
        payment_status,
        created_at,
    ) = row;
    Registration {
        id,
        team_name,
        player_name,
        player_mobile,
        player_email,
        player_role,
        screenshot,
        aadhaar,
        passport_photo,
        payment_screenshot,
        payment_status: PaymentStatus::from_column(payment_status.as_deref()),
        created_at: created_at.unwrap_or_default(),
    }
}

/// Capability contract shared by the remote and embedded backends.
#[async_trait::async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug {
    /// Persists a new registration with defaults applied and returns the
    /// backend-assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Write`] on constraint or connectivity
    /// failure.
    async fn insert(&self, rec: NewRegistration) -> Result<i64, RegistryError>;

    /// Returns every registration ordered by `id` descending (newest
    /// submissions first), eagerly materialized.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] on query failure.
    async fn list_all(&self) -> Result<Vec<Registration>, RegistryError>;

    /// Returns the matching registration, or `None` when no record has
    /// the given id. Not-found is never an error here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] only on genuine query failure.
    async fn get_by_id(&self, id: i64) -> Result<Option<Registration>, RegistryError>;

    /// Unconditionally overwrites the payment status to `verified`.
    /// Calling twice is safe and produces the same end state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no row has the given id,
    /// or [`RegistryError::Write`] on backend failure.
    async fn mark_verified(&self, id: i64) -> Result<(), RegistryError>;

    /// Unconditionally overwrites the payment status to `rejected`.
    /// Calling twice is safe and produces the same end state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no row has the given id,
    /// or [`RegistryError::Write`] on backend failure.
    async fn mark_rejected(&self, id: i64) -> Result<(), RegistryError>;

    /// Removes the registration row.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no row has the given id,
    /// or [`RegistryError::Write`] on backend failure.
    async fn delete_by_id(&self, id: i64) -> Result<(), RegistryError>;
}

/// Connects the backend selected by the configuration, once, at startup.
///
/// # Errors
///
/// Returns [`RegistryError::Read`] when the remote pool cannot be
/// established or the embedded database cannot be opened.
pub async fn connect(
    config: &BackendConfig,
) -> Result<Arc<dyn RegistrationStore>, RegistryError> {
    match config {
        BackendConfig::Remote {
            url,
            max_connections,
            min_connections,
            connect_timeout_secs,
        } => {
            let store = postgres::PostgresStore::connect(
                url,
                *max_connections,
                *min_connections,
                *connect_timeout_secs,
            )
            .await?;
            tracing::info!("registration store backend: remote postgres");
            Ok(Arc::new(store))
        }
        BackendConfig::Embedded { path } => {
            let store = sqlite::SqliteStore::open(path).await?;
            tracing::info!(path = %path.display(), "registration store backend: embedded sqlite");
            Ok(Arc::new(store))
        }
    }
}
