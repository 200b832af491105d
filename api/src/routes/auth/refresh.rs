use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::{bad_request, handle_rotation_error};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new token pair. The presented refresh
/// token is revoked and cannot be used again.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "access_expires_in": 604800,
///     "refresh_expires_in": 2592000
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty refresh token
/// - 401 Unauthorized (`reauthenticate`): Invalid, expired or already used refresh token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    if let Err(e) = request.validate() {
        return bad_request(e.to_string());
    }

    match state.token_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(pair),
        Err(error) => handle_rotation_error(error),
    }
}
