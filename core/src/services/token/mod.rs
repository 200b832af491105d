//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access/refresh pair issuance
//! - Verification with typed failure reasons
//! - Refresh token rotation and logout revocation
//! - Background sweeping of the revocation store

mod config;
mod issuer;
mod service;
mod sweeper;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use service::TokenService;
pub use sweeper::{RevocationSweeper, SweepPolicy, SweepReport, SweeperConfig, SweeperHandle};
pub use verifier::TokenVerifier;
