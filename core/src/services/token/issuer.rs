//! Signs access/refresh token pairs

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::clock::Clock;
use crate::domain::entities::identity::IdentityClaim;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Both token kinds share this algorithm
pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

struct SigningPolicy {
    key: EncodingKey,
    ttl: Duration,
}

/// Stateless token issuer
pub struct TokenIssuer {
    access: SigningPolicy,
    refresh: SigningPolicy,
    issuer: String,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            access: SigningPolicy {
                key: EncodingKey::from_secret(&config.access_secret),
                ttl: config.access_ttl,
            },
            refresh: SigningPolicy {
                key: EncodingKey::from_secret(&config.refresh_secret),
                ttl: config.refresh_ttl,
            },
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            clock,
        }
    }

    /// Issues an access/refresh pair carrying `identity`
    pub fn issue(&self, identity: &IdentityClaim) -> Result<TokenPair, TokenError> {
        let (access_token, _) = self.sign(TokenKind::Access, identity)?;
        let (refresh_token, _) = self.sign(TokenKind::Refresh, identity)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access.ttl,
            self.refresh.ttl,
        ))
    }

    /// Signs a single token, returning it with the claims it carries
    pub fn sign(&self, kind: TokenKind, identity: &IdentityClaim) -> Result<(String, Claims), TokenError> {
        let policy = self.policy(kind);
        let issued_at = self.clock.now();
        if issued_at.checked_add_signed(policy.ttl).is_none() {
            return Err(TokenError::ExpiryOutOfRange {
                kind: kind.as_str(),
            });
        }

        let claims = Claims::new(
            kind,
            identity.clone(),
            &self.issuer,
            &self.audience,
            issued_at,
            policy.ttl,
        );
        let token = encode(&Header::new(ALGORITHM), &claims, &policy.key)?;
        Ok((token, claims))
    }

    fn policy(&self, kind: TokenKind) -> &SigningPolicy {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}
