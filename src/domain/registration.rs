//! The canonical registration record and its field-presence rules.
//!
//! Both storage backends insert and return records through these types,
//! so absent values are always an explicit `None` (never an engine-specific
//! "undefined") and defaults are applied in exactly one place.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payment verification state of a registration.
///
/// Transitions only ever go `Pending → Verified` or `Pending → Rejected`;
/// the store applies status writes unconditionally, so repeating a
/// transition is an idempotent overwrite with the same end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting administrator review. Initial state for every submission.
    Pending,
    /// Payment confirmed by an administrator.
    Verified,
    /// Payment rejected by an administrator.
    Rejected,
}

impl PaymentStatus {
    /// The canonical lowercase string stored in the `payment_status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a stored column value, treating `NULL` and anything
    /// unrecognized from older schema versions as [`Self::Pending`].
    #[must_use]
    pub fn from_column(value: Option<&str>) -> Self {
        match value {
            Some("verified") => Self::Verified,
            Some("rejected") => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's registration as persisted by either backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    /// Backend-assigned identity. Immutable, monotonically increasing.
    pub id: i64,
    /// Optional team name.
    pub team_name: Option<String>,
    /// Player's full name.
    pub player_name: Option<String>,
    /// Player's mobile number.
    pub player_mobile: Option<String>,
    /// Player's email address. Used for the verification notification.
    pub player_email: Option<String>,
    /// Playing role (e.g. `"batter"`).
    pub player_role: Option<String>,
    /// Legacy evidence reference from older schema versions.
    pub screenshot: Option<String>,
    /// Legacy identity-document reference from older schema versions.
    pub aadhaar: Option<String>,
    /// Path/URI of the uploaded passport photo.
    pub passport_photo: Option<String>,
    /// Path/URI of the uploaded payment screenshot.
    pub payment_screenshot: Option<String>,
    /// Payment verification state.
    pub payment_status: PaymentStatus,
    /// Creation time in epoch milliseconds. Set once, never mutated.
    pub created_at: i64,
}

impl Registration {
    /// Populated evidence-file references, in cleanup order: payment
    /// screenshot, passport photo, then the legacy fields.
    #[must_use]
    pub fn evidence_references(&self) -> Vec<&str> {
        [
            self.payment_screenshot.as_deref(),
            self.passport_photo.as_deref(),
            self.screenshot.as_deref(),
            self.aadhaar.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A caller-supplied registration, before defaults are applied.
///
/// Required-field validation happens upstream (at the submission
/// boundary); the record model only normalizes presence and defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRegistration {
    /// Optional team name.
    pub team_name: Option<String>,
    /// Player's full name.
    pub player_name: Option<String>,
    /// Player's mobile number.
    pub player_mobile: Option<String>,
    /// Player's email address.
    pub player_email: Option<String>,
    /// Playing role.
    pub player_role: Option<String>,
    /// Legacy evidence reference.
    pub screenshot: Option<String>,
    /// Legacy identity-document reference.
    pub aadhaar: Option<String>,
    /// Path/URI of the uploaded passport photo.
    pub passport_photo: Option<String>,
    /// Path/URI of the uploaded payment screenshot.
    pub payment_screenshot: Option<String>,
    /// Payment status; defaults to [`PaymentStatus::Pending`] when unset.
    pub payment_status: Option<PaymentStatus>,
    /// Creation time in epoch milliseconds; defaults to now when unset.
    pub created_at: Option<i64>,
}

impl NewRegistration {
    /// Applies the record model's presence rules and defaults.
    ///
    /// Empty and whitespace-only strings become `None` so both backends
    /// store the same `NULL`; `payment_status` falls back to `pending`
    /// and `created_at` to the current time in epoch milliseconds.
    #[must_use]
    pub fn normalized(self) -> NormalizedRegistration {
        NormalizedRegistration {
            team_name: clean(self.team_name),
            player_name: clean(self.player_name),
            player_mobile: clean(self.player_mobile),
            player_email: clean(self.player_email),
            player_role: clean(self.player_role),
            screenshot: clean(self.screenshot),
            aadhaar: clean(self.aadhaar),
            passport_photo: clean(self.passport_photo),
            payment_screenshot: clean(self.payment_screenshot),
            payment_status: self.payment_status.unwrap_or(PaymentStatus::Pending),
            created_at: self
                .created_at
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        }
    }
}

/// A registration with defaults applied, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRegistration {
    /// Optional team name.
    pub team_name: Option<String>,
    /// Player's full name.
    pub player_name: Option<String>,
    /// Player's mobile number.
    pub player_mobile: Option<String>,
    /// Player's email address.
    pub player_email: Option<String>,
    /// Playing role.
    pub player_role: Option<String>,
    /// Legacy evidence reference.
    pub screenshot: Option<String>,
    /// Legacy identity-document reference.
    pub aadhaar: Option<String>,
    /// Path/URI of the uploaded passport photo.
    pub passport_photo: Option<String>,
    /// Path/URI of the uploaded payment screenshot.
    pub payment_screenshot: Option<String>,
    /// Payment status, `pending` unless explicitly supplied.
    pub payment_status: PaymentStatus,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

fn clean(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_on_normalize() {
        let rec = NewRegistration {
            player_name: Some("A".to_string()),
            ..NewRegistration::default()
        };
        let norm = rec.normalized();
        assert_eq!(norm.payment_status, PaymentStatus::Pending);
        assert!(norm.created_at > 0);
        assert_eq!(norm.player_name.as_deref(), Some("A"));
    }

    #[test]
    fn explicit_values_survive_normalize() {
        let rec = NewRegistration {
            payment_status: Some(PaymentStatus::Verified),
            created_at: Some(1_700_000_000_000),
            ..NewRegistration::default()
        };
        let norm = rec.normalized();
        assert_eq!(norm.payment_status, PaymentStatus::Verified);
        assert_eq!(norm.created_at, 1_700_000_000_000);
    }

    #[test]
    fn empty_strings_normalize_to_none() {
        let rec = NewRegistration {
            team_name: Some(String::new()),
            player_mobile: Some("   ".to_string()),
            player_name: Some("B".to_string()),
            ..NewRegistration::default()
        };
        let norm = rec.normalized();
        assert_eq!(norm.team_name, None);
        assert_eq!(norm.player_mobile, None);
        assert_eq!(norm.player_name.as_deref(), Some("B"));
    }

    #[test]
    fn status_parses_legacy_column_values() {
        assert_eq!(PaymentStatus::from_column(None), PaymentStatus::Pending);
        assert_eq!(
            PaymentStatus::from_column(Some("verified")),
            PaymentStatus::Verified
        );
        assert_eq!(
            PaymentStatus::from_column(Some("rejected")),
            PaymentStatus::Rejected
        );
        assert_eq!(
            PaymentStatus::from_column(Some("garbage")),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn evidence_references_skip_absent_fields() {
        let rec = Registration {
            id: 1,
            team_name: None,
            player_name: Some("A".to_string()),
            player_mobile: None,
            player_email: None,
            player_role: None,
            screenshot: None,
            aadhaar: Some("/uploads/a.pdf".to_string()),
            passport_photo: Some("/uploads/p.jpg".to_string()),
            payment_screenshot: None,
            payment_status: PaymentStatus::Pending,
            created_at: 0,
        };
        assert_eq!(
            rec.evidence_references(),
            vec!["/uploads/p.jpg", "/uploads/a.pdf"]
        );
    }
}
