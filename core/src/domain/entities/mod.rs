//! Domain entities for token-based authentication.

pub mod identity;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use identity::{IdentityClaim, RESERVED_CLAIMS, USER_ID_FIELD};
pub use revocation::{fingerprint, RevocationEntry};
pub use token::{Claims, TokenKind, TokenPair};
