//! Registration DTOs for the submission and administrative endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DeleteOutcome, NewRegistration, NotificationOutcome, PaymentStatus, Registration,
    VerifyOutcome,
};

/// Request body for `POST /registrations`.
///
/// The evidence fields carry the path/URI strings produced by the
/// upstream upload handler; this service never receives file bytes.
/// Wire names keep the historical mix of camelCase text fields and
/// snake_case file fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitRegistrationRequest {
    /// Optional team name.
    #[serde(default, rename = "teamName")]
    pub team_name: Option<String>,
    /// Player's full name (required).
    #[serde(default, rename = "playerName")]
    pub player_name: Option<String>,
    /// Player's mobile number (required).
    #[serde(default, rename = "playerMobile")]
    pub player_mobile: Option<String>,
    /// Player's email address (required).
    #[serde(default, rename = "playerEmail")]
    pub player_email: Option<String>,
    /// Playing role (required).
    #[serde(default, rename = "playerRole")]
    pub player_role: Option<String>,
    /// Uploaded passport photo reference (required).
    #[serde(default)]
    pub passport_photo: Option<String>,
    /// Uploaded payment screenshot reference (required).
    #[serde(default)]
    pub payment_screenshot: Option<String>,
}

impl From<SubmitRegistrationRequest> for NewRegistration {
    fn from(req: SubmitRegistrationRequest) -> Self {
        Self {
            team_name: req.team_name,
            player_name: req.player_name,
            player_mobile: req.player_mobile,
            player_email: req.player_email,
            player_role: req.player_role,
            passport_photo: req.passport_photo,
            payment_screenshot: req.payment_screenshot,
            ..Self::default()
        }
    }
}

/// Response body for `POST /registrations` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitRegistrationResponse {
    /// Backend-assigned registration id.
    pub id: i64,
}

/// One registration in administrative responses. Field names mirror
/// the stored column names.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationDto {
    /// Registration id.
    pub id: i64,
    /// Team name.
    #[serde(rename = "teamName")]
    pub team_name: Option<String>,
    /// Player's full name.
    #[serde(rename = "playerName")]
    pub player_name: Option<String>,
    /// Player's mobile number.
    #[serde(rename = "playerMobile")]
    pub player_mobile: Option<String>,
    /// Player's email address.
    #[serde(rename = "playerEmail")]
    pub player_email: Option<String>,
    /// Playing role.
    #[serde(rename = "playerRole")]
    pub player_role: Option<String>,
    /// Legacy evidence reference.
    pub screenshot: Option<String>,
    /// Legacy identity-document reference.
    pub aadhaar: Option<String>,
    /// Passport photo reference.
    pub passport_photo: Option<String>,
    /// Payment screenshot reference.
    pub payment_screenshot: Option<String>,
    /// Payment verification state.
    pub payment_status: PaymentStatus,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl From<Registration> for RegistrationDto {
    fn from(rec: Registration) -> Self {
        Self {
            id: rec.id,
            team_name: rec.team_name,
            player_name: rec.player_name,
            player_mobile: rec.player_mobile,
            player_email: rec.player_email,
            player_role: rec.player_role,
            screenshot: rec.screenshot,
            aadhaar: rec.aadhaar,
            passport_photo: rec.passport_photo,
            payment_screenshot: rec.payment_screenshot,
            payment_status: rec.payment_status,
            created_at: rec.created_at,
        }
    }
}

/// Best-effort notification result on a verification response.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationDto {
    /// `"sent"`, `"skipped"` or `"failed"`.
    pub status: String,
    /// Failure reason when `status` is `"failed"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<NotificationOutcome> for NotificationDto {
    fn from(outcome: NotificationOutcome) -> Self {
        match outcome {
            NotificationOutcome::Sent => Self {
                status: "sent".to_string(),
                reason: None,
            },
            NotificationOutcome::Skipped => Self {
                status: "skipped".to_string(),
                reason: None,
            },
            NotificationOutcome::Failed(reason) => Self {
                status: "failed".to_string(),
                reason: Some(reason),
            },
        }
    }
}

/// Response body for `POST /registrations/{id}/verify`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// The record after the status write.
    pub registration: RegistrationDto,
    /// Best-effort notification result (never an error).
    pub notification: NotificationDto,
}

impl From<VerifyOutcome> for VerifyResponse {
    fn from(outcome: VerifyOutcome) -> Self {
        Self {
            registration: outcome.registration.into(),
            notification: outcome.notification.into(),
        }
    }
}

/// A file that could not be cleaned up during deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct CleanupWarningDto {
    /// The stored file reference.
    pub reference: String,
    /// Why removal failed.
    pub reason: String,
}

/// Response body for `DELETE /registrations/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Id of the deleted registration.
    pub id: i64,
    /// Evidence references removed (or already absent).
    pub removed: Vec<String>,
    /// Best-effort cleanup failures; the record itself is gone.
    pub cleanup_warnings: Vec<CleanupWarningDto>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            id: outcome.registration.id,
            removed: outcome.removed,
            cleanup_warnings: outcome
                .failed
                .into_iter()
                .map(|f| CleanupWarningDto {
                    reference: f.reference,
                    reason: f.reason,
                })
                .collect(),
        }
    }
}
