//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::RegistrationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lifecycle controller for all registration operations.
    pub service: Arc<RegistrationService>,
}
