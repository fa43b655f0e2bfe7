//! Domain entities - the cart data the client state works with.

mod cart;

pub use cart::{CartLine, CartSnapshot};
