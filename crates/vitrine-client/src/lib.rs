//! # Vitrine Client
//!
//! Client state services for the Vitrine storefront: the shared cart item
//! counter and rate limited execution of user actions, composed in
//! [`ClientState`].
//!
//! Host applications build a [`ClientState`] once per visitor session,
//! hand out clones, and call [`ClientState::shutdown`] when the session
//! ends.

pub mod counter;
pub mod guard;
pub mod policy;
pub mod state;
pub mod telemetry;

pub use counter::{CART_COUNT_KEY, CartCounter, CartState};
pub use guard::ActionGuard;
pub use policy::ActionPolicy;
pub use state::{ClientConfig, ClientState};
pub use telemetry::{TelemetryConfig, init_tracing};
