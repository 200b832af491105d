//! Response types shared by the HTTP layer

pub mod response;

pub use response::{HealthResponse, HealthStatus};
