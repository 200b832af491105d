//! Maps domain errors to HTTP responses.
//!
//! Clients only ever see a generic code; the precise cause is logged.

use actix_web::HttpResponse;
use quill_core::errors::{DomainError, RotationError, VerificationError};
use quill_shared::{error_codes, ErrorResponse};
use tracing::{error, warn};

pub fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHENTICATED,
        "Authentication required",
    ))
}

pub fn reauthenticate() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::REAUTHENTICATE,
        "Please sign in again",
    ))
}

pub fn service_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
        error_codes::SERVICE_UNAVAILABLE,
        "The service is temporarily unavailable",
    ))
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
}

pub fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

/// A rejected access token
pub fn handle_verification_error(reason: VerificationError) -> HttpResponse {
    if reason.is_transient() {
        return service_unavailable();
    }
    unauthenticated()
}

/// A failed refresh-token exchange
pub fn handle_rotation_error(error: RotationError) -> HttpResponse {
    match error {
        RotationError::InvalidRefreshToken { reason } if reason.is_transient() => service_unavailable(),
        RotationError::InvalidRefreshToken { reason } => {
            warn!(reason = reason.code(), "refresh rejected");
            reauthenticate()
        }
        RotationError::Store(e) => {
            error!(error = %e, "refresh failed on revocation store");
            service_unavailable()
        }
        RotationError::Claim(e) => {
            error!(error = %e, "refresh produced an invalid identity claim");
            internal_error()
        }
        RotationError::Token(e) => {
            error!(error = %e, "refresh failed to sign tokens");
            internal_error()
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Verification(reason) => {
            warn!(reason = reason.code(), "request rejected");
            handle_verification_error(reason)
        }
        DomainError::Rotation(e) => handle_rotation_error(e),
        DomainError::Store(e) => {
            error!(error = %e, "revocation store failure");
            service_unavailable()
        }
        other => {
            error!(error = %other, "unhandled domain error");
            internal_error()
        }
    }
}
