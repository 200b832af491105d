//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{ClaimError, RotationError, StoreError, TokenError, VerificationError};
pub use quill_shared::ConfigError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DomainResult<T> = Result<T, DomainError>;
