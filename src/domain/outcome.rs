//! Outcome types for lifecycle operations with best-effort side effects.
//!
//! Verification and deletion both carry a primary result plus non-fatal
//! warnings (a failed notification, an orphaned file). Those are modeled
//! as data on a successful outcome rather than errors, so a committed
//! status write or record deletion is never reported as a failure.

use serde::Serialize;

use super::registration::Registration;

/// What happened to the verification notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "reason")]
pub enum NotificationOutcome {
    /// The notification was handed to the delivery channel.
    Sent,
    /// No channel configured, or the record has no email address.
    Skipped,
    /// Delivery failed; the verification itself still succeeded.
    Failed(String),
}

/// Result of a successful `verify` operation.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// The record as re-read after the status write committed.
    pub registration: Registration,
    /// Best-effort notification result.
    pub notification: NotificationOutcome,
}

/// A single evidence file that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCleanupFailure {
    /// The stored file reference.
    pub reference: String,
    /// Why removal failed.
    pub reason: String,
}

/// Result of a successful `delete` operation.
///
/// The record deletion is authoritative; file cleanup is best-effort, so
/// `failed` lists files that may remain orphaned on disk.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// The record as it existed before deletion.
    pub registration: Registration,
    /// Evidence references that were removed (or already absent).
    pub removed: Vec<String>,
    /// Evidence references whose removal failed.
    pub failed: Vec<FileCleanupFailure>,
}

impl DeleteOutcome {
    /// `true` when every populated evidence file was cleaned up.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
