use actix_web::HttpResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/session
///
/// Returns the identity claim carried by the presented access token.
pub async fn session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        user_id: auth.user_id,
        claim: auth.claim.into(),
        expires_at: auth.expires_at,
    })
}
