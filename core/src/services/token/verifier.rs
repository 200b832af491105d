//! Validates token signature, algorithm, issuer, audience, kind and lifetime

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::debug;

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::VerificationError;

use super::config::TokenServiceConfig;
use super::issuer::ALGORITHM;

/// Stateless token verifier. Revocation is checked by
/// [`TokenService`](super::TokenService), not here.
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        // exp and nbf are checked against the injected clock below
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            access_key: DecodingKey::from_secret(&config.access_secret),
            refresh_key: DecodingKey::from_secret(&config.refresh_secret),
            validation,
            leeway_seconds: config.leeway_seconds,
            clock,
        }
    }

    /// Verifies `token` as a `kind` token and returns all of its claims
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<Claims, VerificationError> {
        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| {
                let reason = map_error_kind(e.kind());
                debug!(kind = %kind, reason = reason.code(), error = %e, "token rejected by decoder");
                reason
            })?
            .claims;

        if claims.typ != kind {
            return Err(VerificationError::WrongKind);
        }

        let now = self.clock.now().timestamp();
        if now - self.leeway_seconds >= claims.exp {
            return Err(VerificationError::Expired);
        }
        if claims.nbf > now + self.leeway_seconds {
            return Err(VerificationError::NotYetValid);
        }
        if claims.sub != claims.identity.user_id() {
            return Err(VerificationError::Malformed);
        }

        Ok(claims)
    }
}

fn map_error_kind(kind: &ErrorKind) -> VerificationError {
    match kind {
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        ErrorKind::ImmatureSignature => VerificationError::NotYetValid,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => VerificationError::BadSignature,
        ErrorKind::InvalidIssuer => VerificationError::IssuerMismatch,
        ErrorKind::InvalidAudience => VerificationError::AudienceMismatch,
        _ => VerificationError::Malformed,
    }
}
