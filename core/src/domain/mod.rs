//! Domain layer containing the token entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    fingerprint, Claims, IdentityClaim, RevocationEntry, TokenKind, TokenPair, RESERVED_CLAIMS,
    USER_ID_FIELD,
};
