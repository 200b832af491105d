//! Application factory
//!
//! Provides the factory for creating the Actix-web application from a
//! prepared [`AppState`].

use actix_web::{web, App, HttpResponse};
use quill_core::RevocationStore;
use quill_shared::{error_codes, ErrorResponse, HealthResponse, HealthStatus};
use tracing::warn;
use tracing_actix_web::TracingLogger;

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{logout::logout, refresh::refresh, session::session, AppState};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "quill-auth";

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        // Per-request spans
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/refresh", web::post().to(refresh))
                    .route("/logout", web::post().to(logout).wrap(JwtAuth::new()))
                    .route("/session", web::get().to(session).wrap(JwtAuth::new())),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = state.token_service.store();
    let store_status = match store.ping().await {
        Ok(_) => HealthStatus::Healthy,
        Err(e) => {
            warn!(backend = store.backend_name(), error = %e, "revocation store health check failed");
            HealthStatus::Unhealthy
        }
    };

    HttpResponse::Ok().json(
        HealthResponse::new(SERVICE_NAME, env!("CARGO_PKG_VERSION"))
            .with_check("revocation_store", store_status),
    )
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
