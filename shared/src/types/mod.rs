//! Type definitions shared by the API layer
//!
//! - `response` - API response envelopes and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
