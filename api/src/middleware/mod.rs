pub mod auth;
pub mod cache;

pub use auth::*;
pub use cache::*;
