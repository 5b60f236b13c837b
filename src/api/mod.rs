//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`. Authentication,
//! multipart upload handling and static assets are external to this
//! service.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the registration endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::registration::submit_registration,
        handlers::admin::list_registrations,
        handlers::admin::get_registration,
        handlers::admin::verify_registration,
        handlers::admin::reject_registration,
        handlers::admin::delete_registration,
        handlers::system::health_handler,
    ),
    components(schemas(
        crate::domain::PaymentStatus,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        dto::SubmitRegistrationRequest,
        dto::SubmitRegistrationResponse,
        dto::RegistrationDto,
        dto::NotificationDto,
        dto::VerifyResponse,
        dto::CleanupWarningDto,
        dto::DeleteResponse,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Registrations", description = "Participant submission"),
        (name = "Admin", description = "Payment verification lifecycle"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
