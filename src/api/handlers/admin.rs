//! Administrative endpoints: list, detail, verify, reject, delete.
//!
//! Request authentication is handled by the deployment in front of this
//! service; these handlers only drive the lifecycle controller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::dto::{DeleteResponse, RegistrationDto, VerifyResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RegistryError};

/// `GET /registrations` — All registrations, newest first.
///
/// # Errors
///
/// Returns [`RegistryError::Read`] when the store query fails.
#[utoipa::path(
    get,
    path = "/api/v1/registrations",
    tag = "Admin",
    summary = "List registrations",
    description = "Returns every registration ordered by id descending (newest submissions first).",
    responses(
        (status = 200, description = "Registration list", body = Vec<RegistrationDto>),
        (status = 500, description = "Store read failed", body = ErrorResponse),
    )
)]
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RegistryError> {
    let rows = state.service.list().await?;
    let dtos: Vec<RegistrationDto> = rows.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(dtos)))
}

/// `GET /registrations/{id}` — One registration by id.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] when absent, or
/// [`RegistryError::Read`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/registrations/{id}",
    tag = "Admin",
    summary = "Get a registration",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration detail", body = RegistrationDto),
        (status = 404, description = "No such registration", body = ErrorResponse),
    )
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, RegistryError> {
    let rec = state.service.get(id).await?;
    Ok((StatusCode::OK, Json(RegistrationDto::from(rec))))
}

/// `POST /registrations/{id}/verify` — Mark the payment verified.
///
/// Notification delivery is best-effort: the response reports
/// `sent`, `skipped` or `failed`, never an error, once the status write
/// has committed.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] when absent, or
/// [`RegistryError::Write`] when the status write fails.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/{id}/verify",
    tag = "Admin",
    summary = "Verify a payment",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Payment verified", body = VerifyResponse),
        (status = 404, description = "No such registration", body = ErrorResponse),
        (status = 500, description = "Status write failed", body = ErrorResponse),
    )
)]
pub async fn verify_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, RegistryError> {
    let outcome = state.service.verify(id).await?;
    Ok((StatusCode::OK, Json(VerifyResponse::from(outcome))))
}

/// `POST /registrations/{id}/reject` — Mark the payment rejected.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] when absent, or
/// [`RegistryError::Write`] when the status write fails.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/{id}/reject",
    tag = "Admin",
    summary = "Reject a payment",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Payment rejected", body = RegistrationDto),
        (status = 404, description = "No such registration", body = ErrorResponse),
        (status = 500, description = "Status write failed", body = ErrorResponse),
    )
)]
pub async fn reject_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, RegistryError> {
    let rec = state.service.reject(id).await?;
    Ok((StatusCode::OK, Json(RegistrationDto::from(rec))))
}

/// `DELETE /registrations/{id}` — Delete a registration and its files.
///
/// File cleanup is best-effort and reported as warnings; the record
/// deletion is authoritative.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] when absent, or
/// [`RegistryError::Write`] when the row deletion fails.
#[utoipa::path(
    delete,
    path = "/api/v1/registrations/{id}",
    tag = "Admin",
    summary = "Delete a registration",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration deleted", body = DeleteResponse),
        (status = 404, description = "No such registration", body = ErrorResponse),
        (status = 500, description = "Record deletion failed", body = ErrorResponse),
    )
)]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, RegistryError> {
    let outcome = state.service.delete(id).await?;
    Ok((StatusCode::OK, Json(DeleteResponse::from(outcome))))
}
