//! HTTP surface of the Quill token service
//!
//! Exposes refresh, logout and session endpoints on top of
//! [`quill_core::TokenService`], plus the JWT middleware protecting them.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::auth::AppState;
