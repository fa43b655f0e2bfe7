use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item in a cart snapshot.
///
/// The commerce platform sends more fields than these; everything the
/// counter does not need is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLine {
    /// Opaque platform identifier for the line item.
    #[serde(default)]
    pub id: Option<String>,
    /// Quantity of the product on this line. Missing quantities read as 0.
    #[serde(default)]
    pub quantity: u32,
}

impl CartLine {
    /// Create a line with just a quantity, as tests and fixtures need.
    pub fn with_quantity(quantity: u32) -> Self {
        Self { id: None, quantity }
    }
}

/// Snapshot of the cart as returned by the external commerce platform.
///
/// A snapshot with no `items` field is a valid empty cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Opaque platform cart identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Line items currently in the cart.
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// When the platform last touched the cart.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CartSnapshot {
    /// Total item quantity across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
