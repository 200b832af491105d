pub mod auth;

pub use auth::*;
pub use quill_shared::ErrorResponse;
