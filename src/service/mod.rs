//! Service layer: the registration lifecycle controller.

pub mod registration_service;

pub use registration_service::RegistrationService;
