//! # tourney-registry
//!
//! Registration store and payment-verification service for tournament
//! signups. One logical registration store backed interchangeably by a
//! remote PostgreSQL service or an embedded SQLite database, selected
//! once at startup by configuration presence, plus the lifecycle
//! controller that verifies, rejects and deletes registrations without
//! corrupting state on partial failure.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RegistrationService (service/)
//!     │       │── Notifier (notify)          best-effort
//!     │       │── EvidenceStore (evidence)   best-effort
//!     │
//!     └── RegistrationStore (persistence/)
//!             ├── PostgresStore  — remote relational service
//!             └── SqliteStore    — embedded database file
//! ```
//!
//! The standalone `migrate` binary evolves the embedded store's schema
//! (backup-before-mutate, additive columns, transactional column
//! removal) before the service is started against it.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod evidence;
pub mod notify;
pub mod persistence;
pub mod service;
