//! Domain types: the canonical registration record, its lifecycle states
//! and the outcome shapes for operations with best-effort side effects.

pub mod outcome;
pub mod registration;

pub use outcome::{DeleteOutcome, FileCleanupFailure, NotificationOutcome, VerifyOutcome};
pub use registration::{NewRegistration, NormalizedRegistration, PaymentStatus, Registration};
