//! Error types for token issuance, verification, rotation and revocation.
//!
//! Variants are precise so logs can tell causes apart; the HTTP layer
//! collapses them into generic responses.

use thiserror::Error;

/// Invalid identity claim
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("identity claim requires a non-empty string userId")]
    MissingUserId,

    #[error("identity claim may not contain registered claim `{field}`")]
    ReservedField { field: String },

    #[error("identity claim must be a JSON object")]
    NotAnObject,
}

/// Token issuance errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    SigningFailed(#[from] jsonwebtoken::errors::Error),

    #[error("{kind} token lifetime overflows the expiry timestamp")]
    ExpiryOutOfRange { kind: &'static str },
}

/// Why a token was not accepted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,

    #[error("token signature verification failed")]
    BadSignature,

    #[error("token issuer mismatch")]
    IssuerMismatch,

    #[error("token audience mismatch")]
    AudienceMismatch,

    #[error("token kind mismatch")]
    WrongKind,

    #[error("token subject mismatch")]
    SubjectMismatch,

    #[error("malformed token")]
    Malformed,

    #[error("token revoked")]
    Revoked,

    #[error("revocation status unavailable")]
    RevocationUnavailable,
}

impl VerificationError {
    /// Stable short code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::Expired => "expired",
            VerificationError::NotYetValid => "not_yet_valid",
            VerificationError::BadSignature => "bad_signature",
            VerificationError::IssuerMismatch => "issuer_mismatch",
            VerificationError::AudienceMismatch => "audience_mismatch",
            VerificationError::WrongKind => "wrong_kind",
            VerificationError::SubjectMismatch => "subject_mismatch",
            VerificationError::Malformed => "malformed",
            VerificationError::Revoked => "revoked",
            VerificationError::RevocationUnavailable => "revocation_unavailable",
        }
    }

    /// True when the failure says nothing about the token itself
    pub fn is_transient(&self) -> bool {
        matches!(self, VerificationError::RevocationUnavailable)
    }
}

/// Revocation store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("revocation store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Refresh-token rotation failures. None of them leave a new token pair or a
/// revocation entry behind.
#[derive(Error, Debug)]
pub enum RotationError {
    #[error("invalid refresh token: {reason}")]
    InvalidRefreshToken { reason: VerificationError },

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<VerificationError> for RotationError {
    fn from(reason: VerificationError) -> Self {
        RotationError::InvalidRefreshToken { reason }
    }
}
