use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::{bad_request, handle_domain_error};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presenting access token and the session's refresh token
/// until each one's natural expiry.
/// Requires authentication via Bearer token in Authorization header.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
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
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token, or a refresh token of another user
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<LogoutRequest>,
) -> HttpResponse {
    if let Err(e) = request.validate() {
        return bad_request(e.to_string());
    }

    match state
        .token_service
        .logout(&auth.token, &request.refresh_token)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
