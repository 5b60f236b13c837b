//! Registration lifecycle controller.
//!
//! Enforces the payment-status state machine (`pending` → `verified` or
//! `rejected`, both terminal) and coordinates deletion side effects. The
//! controller is the only caller of the storage backend. Store failures
//! always surface; the two deliberate downgrades are notification
//! failure during verify and file-removal failure during delete, both
//! reported as warnings on successful outcomes.

use std::sync::Arc;

use crate::domain::{
    DeleteOutcome, FileCleanupFailure, NewRegistration, NotificationOutcome, Registration,
    VerifyOutcome,
};
use crate::error::RegistryError;
use crate::evidence::EvidenceStore;
use crate::notify::Notifier;
use crate::persistence::RegistrationStore;

/// Orchestration layer for all registration operations.
///
/// Stateless coordinator over the injected store, notifier and evidence
/// collaborators, all chosen once at process start.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    notifier: Option<Arc<dyn Notifier>>,
    evidence: Arc<dyn EvidenceStore>,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`. A `None` notifier disables
    /// delivery; verifications then report the notification as skipped.
    #[must_use]
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        notifier: Option<Arc<dyn Notifier>>,
        evidence: Arc<dyn EvidenceStore>,
    ) -> Self {
        Self {
            store,
            notifier,
            evidence,
        }
    }

    /// Persists a new submission and returns its backend-assigned id.
    /// Required-field validation happens upstream; defaults are applied
    /// by the record model.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Write`] when the insert fails.
    pub async fn submit(&self, rec: NewRegistration) -> Result<i64, RegistryError> {
        let id = self.store.insert(rec).await?;
        tracing::info!(%id, "registration saved");
        Ok(id)
    }

    /// All registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] when the query fails.
    pub async fn list(&self) -> Result<Vec<Registration>, RegistryError> {
        self.store.list_all().await
    }

    /// One registration by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when absent, or
    /// [`RegistryError::Read`] when the query fails.
    pub async fn get(&self, id: i64) -> Result<Registration, RegistryError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// Marks the payment verified, re-reads the record, then attempts a
    /// best-effort notification to the registrant. The verification has
    /// succeeded once the status write committed; delivery failure is
    /// carried as [`NotificationOutcome::Failed`] on a successful result.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no record has the id,
    /// or the store's error when the write or re-read fails.
    pub async fn verify(&self, id: i64) -> Result<VerifyOutcome, RegistryError> {
        self.store.mark_verified(id).await?;
        let registration = self.get(id).await?;

        let notification = match (&self.notifier, registration.player_email.as_deref()) {
            (Some(notifier), Some(email)) => {
                let name = registration.player_name.as_deref().unwrap_or("player");
                let body = format!(
                    "Hi {name},\n\nYour tournament registration has been VERIFIED. \
                     Payment and details confirmed.\n\nRegards,\nTournament Management"
                );
                match notifier.send(email, "Registration Verified", &body).await {
                    Ok(()) => {
                        tracing::info!(%id, email, "verification notification sent");
                        NotificationOutcome::Sent
                    }
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "notification failed (non-fatal)");
                        NotificationOutcome::Failed(e.to_string())
                    }
                }
            }
            _ => NotificationOutcome::Skipped,
        };

        tracing::info!(%id, "payment verified");
        Ok(VerifyOutcome {
            registration,
            notification,
        })
    }

    /// Marks the payment rejected and returns the record as re-read.
    /// No notification side effect.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no record has the id,
    /// or the store's error when the write or re-read fails.
    pub async fn reject(&self, id: i64) -> Result<Registration, RegistryError> {
        self.store.mark_rejected(id).await?;
        let registration = self.get(id).await?;
        tracing::info!(%id, "payment rejected");
        Ok(registration)
    }

    /// Deletes the registration and its evidence files.
    ///
    /// Files first, record second: the record is read up front (absent →
    /// `NotFound`, no file touched), every populated evidence reference
    /// is then removed best-effort, and only afterwards is the row
    /// deleted. An orphaned file is recoverable manual cleanup; a record
    /// pointing at deleted files would not be, so record deletion is the
    /// authoritative step and its failure is the operation's failure.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no record has the id,
    /// or [`RegistryError::Write`] when the row deletion fails (evidence
    /// files may already be gone at that point).
    pub async fn delete(&self, id: i64) -> Result<DeleteOutcome, RegistryError> {
        let registration = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        let mut removed = Vec::new();
        let mut failed = Vec::new();
        for reference in registration.evidence_references() {
            match self.evidence.remove(reference).await {
                Ok(()) => removed.push(reference.to_string()),
                Err(e) => {
                    tracing::warn!(%id, reference, error = %e, "evidence cleanup failed");
                    failed.push(FileCleanupFailure {
                        reference: reference.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.store.delete_by_id(id).await?;
        tracing::info!(%id, removed = removed.len(), failed = failed.len(), "registration deleted");

        Ok(DeleteOutcome {
            registration,
            removed,
            failed,
        })
    }
}
