//! Client-side session handling: token storage and the refresh loop

mod client;
mod store;


pub use client::{ClientSession, RefreshTransport};
pub use store::{MemoryTokenStore, TokenStore};
