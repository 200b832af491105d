//! Main token service implementation

use std::sync::Arc;

use quill_shared::{ConfigError, JwtConfig};
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::identity::IdentityClaim;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainResult, RotationError, StoreError, TokenError, VerificationError};
use crate::repositories::RevocationStore;

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::verifier::TokenVerifier;

/// Issues, verifies, rotates and revokes tokens.
///
/// The revocation store is the only mutable state; a service is meant to be
/// shared behind an `Arc` by every request handler.
pub struct TokenService<S: RevocationStore> {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    store: S,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a token service on the wall clock
    pub fn new(config: TokenServiceConfig, store: S) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Creates a token service reading time from `clock`
    pub fn with_clock(config: TokenServiceConfig, store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(&config, clock.clone()),
            verifier: TokenVerifier::new(&config, clock.clone()),
            store,
            clock,
            config,
        }
    }

    /// Validates `jwt` and creates a token service on the wall clock
    pub fn from_jwt_config(jwt: &JwtConfig, store: S) -> Result<Self, ConfigError> {
        Ok(Self::new(TokenServiceConfig::from_jwt_config(jwt)?, store))
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Generates a new token pair carrying `identity`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The signed access and refresh tokens
    /// * `Err(TokenError)` - Signing failed
    pub fn issue(&self, identity: &IdentityClaim) -> Result<TokenPair, TokenError> {
        let pair = self.issuer.issue(identity)?;
        debug!(user_id = identity.user_id(), "issued token pair");
        Ok(pair)
    }

    /// Verifies a token and checks it has not been revoked
    ///
    /// # Returns
    ///
    /// * `Ok(IdentityClaim)` - The identity the token was issued for
    /// * `Err(VerificationError)` - Why the token was rejected
    pub async fn verify(&self, token: &str, kind: TokenKind) -> Result<IdentityClaim, VerificationError> {
        self.verify_claims(token, kind).await.map(|claims| claims.identity)
    }

    /// Same as [`verify`](Self::verify) but returns every claim
    ///
    /// A revocation lookup that fails rejects the token with
    /// `RevocationUnavailable`.
    pub async fn verify_claims(&self, token: &str, kind: TokenKind) -> Result<Claims, VerificationError> {
        let claims = self.verifier.decode(token, kind).map_err(|reason| {
            warn!(kind = %kind, reason = reason.code(), "token verification failed");
            reason
        })?;

        match self.store.is_revoked(token).await {
            Ok(false) => Ok(claims),
            Ok(true) => {
                warn!(kind = %kind, user_id = %claims.sub, jti = %claims.jti, "revoked token presented");
                Err(VerificationError::Revoked)
            }
            Err(e) => {
                error!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "revocation lookup failed, rejecting token"
                );
                Err(VerificationError::RevocationUnavailable)
            }
        }
    }

    /// Exchanges a refresh token for a new pair bound to `{userId: user_id}`
    ///
    /// The old refresh token is revoked until its own expiry. Of two
    /// concurrent rotations of the same token exactly one succeeds. On any
    /// failure no pair is returned and no revocation entry is written.
    pub async fn rotate(&self, old_refresh: &str, user_id: &str) -> Result<TokenPair, RotationError> {
        self.exchange(old_refresh, Some(user_id)).await
    }

    /// Exchanges a refresh token for a new pair carrying the same identity
    pub async fn refresh(&self, old_refresh: &str) -> Result<TokenPair, RotationError> {
        self.exchange(old_refresh, None).await
    }

    async fn exchange(&self, old_refresh: &str, user_id: Option<&str>) -> Result<TokenPair, RotationError> {
        let claims = self.verify_claims(old_refresh, TokenKind::Refresh).await?;

        let identity = match user_id {
            Some(user_id) if claims.identity.user_id() != user_id => {
                warn!(
                    token_user_id = claims.identity.user_id(),
                    requested_user_id = user_id,
                    "refresh token presented for another user"
                );
                return Err(VerificationError::SubjectMismatch.into());
            }
            Some(user_id) => IdentityClaim::for_user(user_id)?,
            None => claims.identity.clone(),
        };

        let pair = self.issuer.issue(&identity)?;

        if !self.store.revoke(old_refresh, claims.expires_at()).await? {
            // Lost the race against another rotation of the same token
            warn!(user_id = %claims.sub, jti = %claims.jti, "refresh token reused during rotation");
            return Err(VerificationError::Revoked.into());
        }

        info!(user_id = identity.user_id(), old_jti = %claims.jti, "rotated refresh token");
        Ok(pair)
    }

    /// Revokes a token until its own expiry
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The token was revoked by this call
    /// * `Ok(false)` - The token was already revoked or has already expired
    /// * `Err(DomainError)` - The token is not a valid `kind` token, or the store failed
    pub async fn revoke(&self, token: &str, kind: TokenKind) -> DomainResult<bool> {
        let claims = match self.verifier.decode(token, kind) {
            Ok(claims) => claims,
            Err(VerificationError::Expired) => return Ok(false),
            Err(reason) => return Err(reason.into()),
        };

        let revoked = self.store.revoke(token, claims.expires_at()).await?;
        debug!(kind = %kind, jti = %claims.jti, revoked, "revoke requested");
        Ok(revoked)
    }

    pub async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        self.store.is_revoked(token).await
    }

    /// Revokes a session: the refresh token and the access token presenting it
    ///
    /// Both tokens must verify and belong to the same user, otherwise nothing
    /// is revoked. Revocation status is not checked, so repeating a logout
    /// succeeds.
    ///
    /// The refresh token is revoked first. If the second write fails the
    /// caller gets the store error while the access token still
    /// authenticates, so the logout can be retried with it.
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> DomainResult<()> {
        let access = self.verifier.decode(access_token, TokenKind::Access)?;
        let refresh = self.verifier.decode(refresh_token, TokenKind::Refresh)?;

        if access.sub != refresh.sub {
            warn!(
                access_user_id = %access.sub,
                refresh_user_id = %refresh.sub,
                "logout with a refresh token of another user"
            );
            return Err(VerificationError::SubjectMismatch.into());
        }

        self.store.revoke(refresh_token, refresh.expires_at()).await?;
        self.store.revoke(access_token, access.expires_at()).await?;

        info!(user_id = %access.sub, "session logged out");
        Ok(())
    }
}
