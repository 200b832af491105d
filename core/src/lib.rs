//! # Quill Core
//!
//! Token domain layer for the Quill backend: identity claims, the token
//! issuer and verifier, the revocation store contract, refresh-token
//! rotation and the sweeper that keeps the store bounded.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
