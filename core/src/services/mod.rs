//! Business services containing the token lifecycle.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::{ClientSession, MemoryTokenStore, RefreshTransport, TokenStore};
pub use token::{Clock, ManualClock, SystemClock, TokenCodec, TokenService, TokenServiceConfig};
