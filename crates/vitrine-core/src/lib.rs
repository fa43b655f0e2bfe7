//! # Vitrine Core
//!
//! The domain layer of the Vitrine storefront client state.
//! This crate contains the cart snapshot model and the ports the client
//! services depend on, with zero infrastructure dependencies.

pub mod domain;
pub mod ports;
