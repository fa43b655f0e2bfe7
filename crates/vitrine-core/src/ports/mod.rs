//! Ports - trait definitions for the capabilities the client state uses.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod session_store;

pub use rate_limit::{RateLimitExceeded, RateLimiter};
pub use session_store::{SessionStore, StoreError};
