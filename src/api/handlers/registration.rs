//! Submission endpoint for new registrations.
//!
//! This is the upstream boundary where required-field validation lives;
//! the store and lifecycle core below it only apply defaults.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::dto::{SubmitRegistrationRequest, SubmitRegistrationResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RegistryError};

/// `POST /registrations` — Record a new tournament registration.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] when a required field is
/// missing, or [`RegistryError::Write`] when the store insert fails.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    tag = "Registrations",
    summary = "Submit a registration",
    description = "Records a participant submission. Evidence fields carry the path/URI strings produced by the upstream upload handler.",
    request_body = SubmitRegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = SubmitRegistrationResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 500, description = "Store write failed", body = ErrorResponse),
    )
)]
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<SubmitRegistrationRequest>,
) -> Result<impl IntoResponse, RegistryError> {
    validate(&req)?;
    let id = state.service.submit(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitRegistrationResponse { id }),
    ))
}

fn validate(req: &SubmitRegistrationRequest) -> Result<(), RegistryError> {
    let required = [
        ("playerName", &req.player_name),
        ("playerMobile", &req.player_mobile),
        ("playerEmail", &req.player_email),
        ("playerRole", &req.player_role),
        ("passport_photo", &req.passport_photo),
        ("payment_screenshot", &req.payment_screenshot),
    ];
    for (name, value) in required {
        if value.as_deref().map(str::trim).is_none_or(str::is_empty) {
            return Err(RegistryError::Validation(format!(
                "missing required field: {name}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn full_request() -> SubmitRegistrationRequest {
        SubmitRegistrationRequest {
            team_name: None,
            player_name: Some("A".to_string()),
            player_mobile: Some("999".to_string()),
            player_email: Some("a@x.com".to_string()),
            player_role: Some("batter".to_string()),
            passport_photo: Some("/u/p1.jpg".to_string()),
            payment_screenshot: Some("/u/s1.jpg".to_string()),
        }
    }

    #[test]
    fn complete_request_passes_validation() {
        assert!(validate(&full_request()).is_ok());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let req = SubmitRegistrationRequest {
            player_role: None,
            ..full_request()
        };
        let Err(RegistryError::Validation(msg)) = validate(&req) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("playerRole"));
    }

    #[test]
    fn whitespace_only_field_is_rejected() {
        let req = SubmitRegistrationRequest {
            player_mobile: Some("   ".to_string()),
            ..full_request()
        };
        assert!(validate(&req).is_err());
    }

    #[test]
    fn team_name_is_optional() {
        let req = SubmitRegistrationRequest {
            team_name: None,
            ..full_request()
        };
        assert!(validate(&req).is_ok());
    }
}
