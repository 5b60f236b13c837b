//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod registration;
pub mod system;

use axum::Router;
use axum::routing::{get, post};

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registrations",
            post(registration::submit_registration).get(admin::list_registrations),
        )
        .route(
            "/registrations/{id}",
            get(admin::get_registration).delete(admin::delete_registration),
        )
        .route(
            "/registrations/{id}/verify",
            post(admin::verify_registration),
        )
        .route(
            "/registrations/{id}/reject",
            post(admin::reject_registration),
        )
}
