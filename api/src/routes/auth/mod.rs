//! Authentication route handlers
//!
//! This module contains the token lifecycle endpoints:
//! - Token refresh (rotation)
//! - Logout
//! - Session inspection

pub mod logout;
pub mod refresh;
pub mod session;

use std::sync::Arc;

use quill_core::{RevocationStore, TokenService};

/// Token service as shared by every worker; the store backend is chosen at startup
pub type SharedTokenService = TokenService<Arc<dyn RevocationStore>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<SharedTokenService>,
}

impl AppState {
    pub fn new(token_service: Arc<SharedTokenService>) -> Self {
        Self { token_service }
    }
}
