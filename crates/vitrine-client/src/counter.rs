//! Shared cart item counter.
//!
//! One [`CartCounter`] instance is shared across the client surfaces that
//! display or change the cart badge. It keeps the count in process memory,
//! mirrors it to the session store so a reload starts from the last known
//! value, and lets observers watch for changes instead of polling.

use std::sync::Arc;

use tokio::sync::watch;

use vitrine_core::domain::CartSnapshot;
use vitrine_core::ports::SessionStore;

/// Session store key holding the last known cart item count.
pub const CART_COUNT_KEY: &str = "cart-item-count";

/// Observable counter state.
///
/// `refresh_serial` increments each time a surface asks the cart badge to
/// re-fetch; observers compare serials rather than interpret the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartState {
    /// Total item quantity across cart lines.
    pub item_count: u64,
    /// Bumped by [`CartCounter::request_refresh`]; the value itself carries
    /// no meaning.
    pub refresh_serial: u64,
}

/// Process-wide cart item counter backed by a session store.
///
/// The in-memory state is authoritative. Store writes are best effort:
/// a failing store degrades persistence across reloads, never the counter
/// itself.
pub struct CartCounter {
    store: Arc<dyn SessionStore>,
    state: watch::Sender<CartState>,
}

impl CartCounter {
    /// Create a counter, seeding the count from `snapshot` when one is
    /// available and from the session store otherwise.
    ///
    /// A missing or unparseable stored value seeds the count to 0. The
    /// constructor never writes to the store; only [`set_count`] and
    /// [`update_from_cart`] persist.
    ///
    /// [`set_count`]: CartCounter::set_count
    /// [`update_from_cart`]: CartCounter::update_from_cart
    pub async fn new(store: Arc<dyn SessionStore>, snapshot: Option<&CartSnapshot>) -> Self {
        let item_count = match snapshot {
            Some(snapshot) => snapshot.item_count(),
            None => Self::restore_count(store.as_ref()).await,
        };

        let (state, _) = watch::channel(CartState {
            item_count,
            refresh_serial: 0,
        });

        tracing::debug!(item_count, "Cart counter initialized");

        Self { store, state }
    }

    async fn restore_count(store: &dyn SessionStore) -> u64 {
        let Some(raw) = store.get(CART_COUNT_KEY).await else {
            return 0;
        };

        match raw.parse() {
            Ok(count) => count,
            Err(_) => {
                tracing::warn!(value = %raw, "Stored cart count is not a number, resetting to 0");
                0
            }
        }
    }

    /// Set the count, notify observers, and persist the new value.
    ///
    /// Store failures are logged and swallowed; the in-memory count always
    /// reflects the caller's value.
    pub async fn set_count(&self, count: u64) {
        self.state.send_modify(|state| state.item_count = count);

        if let Err(e) = self.store.set(CART_COUNT_KEY, &count.to_string()).await {
            tracing::warn!(error = %e, "Failed to persist cart count");
        }

        tracing::debug!(count, "Cart count updated");
    }

    /// Recompute the count from a cart snapshot.
    ///
    /// `None` means the cart could not be fetched; the current count is kept
    /// rather than zeroed, since a stale badge beats a wrong one.
    pub async fn update_from_cart(&self, cart: Option<&CartSnapshot>) {
        match cart {
            Some(cart) => self.set_count(cart.item_count()).await,
            None => {
                tracing::debug!("No cart snapshot, leaving count unchanged");
            }
        }
    }

    /// Ask cart-displaying surfaces to re-fetch from the platform.
    ///
    /// Purely in-memory: bumps the serial and notifies observers, nothing
    /// is persisted.
    pub fn request_refresh(&self) {
        self.state
            .send_modify(|state| state.refresh_serial = state.refresh_serial.wrapping_add(1));
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Current item count.
    pub fn item_count(&self) -> u64 {
        self.state.borrow().item_count
    }

    /// Current refresh serial.
    pub fn refresh_serial(&self) -> u64 {
        self.state.borrow().refresh_serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use vitrine_core::domain::CartLine;
    use vitrine_core::ports::StoreError;
    use vitrine_infra::InMemorySessionStore;

    /// Store double whose writes always fail.
    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get(&self, _key: &str) -> Option<String> {
            None
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("storage disabled".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("storage disabled".to_string()))
        }
    }

    fn snapshot_with_quantities(quantities: &[u32]) -> CartSnapshot {
        CartSnapshot {
            items: quantities.iter().copied().map(CartLine::with_quantity).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_seeds_from_snapshot() {
        let store = Arc::new(InMemorySessionStore::new());
        let snapshot = snapshot_with_quantities(&[2, 3]);

        let counter = CartCounter::new(store.clone(), Some(&snapshot)).await;

        assert_eq!(counter.item_count(), 5);
        // seeding does not persist
        assert_eq!(store.get(CART_COUNT_KEY).await, None);
    }

    #[tokio::test]
    async fn test_seeds_from_store_without_snapshot() {
        let store = Arc::new(InMemorySessionStore::new());
        store.set(CART_COUNT_KEY, "4").await.unwrap();

        let counter = CartCounter::new(store, None).await;

        assert_eq!(counter.item_count(), 4);
    }

    #[tokio::test]
    async fn test_seeds_to_zero_when_nothing_is_known() {
        let store = Arc::new(InMemorySessionStore::new());

        let counter = CartCounter::new(store, None).await;

        assert_eq!(counter.item_count(), 0);
        assert_eq!(counter.refresh_serial(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_stored_value_reads_as_zero() {
        for raw in ["banana", "-3", "1.5", ""] {
            let store = Arc::new(InMemorySessionStore::new());
            store.set(CART_COUNT_KEY, raw).await.unwrap();

            let counter = CartCounter::new(store, None).await;

            assert_eq!(counter.item_count(), 0, "value {raw:?} should read as 0");
        }
    }

    #[tokio::test]
    async fn test_set_count_notifies_and_persists() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = CartCounter::new(store.clone(), None).await;
        let mut rx = counter.subscribe();

        counter.set_count(7).await;

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().item_count, 7);
        assert_eq!(store.get(CART_COUNT_KEY).await.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_update_from_cart_sums_line_quantities() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = CartCounter::new(store.clone(), None).await;
        let snapshot = snapshot_with_quantities(&[1, 2, 3]);

        counter.update_from_cart(Some(&snapshot)).await;

        assert_eq!(counter.item_count(), 6);
        assert_eq!(store.get(CART_COUNT_KEY).await.as_deref(), Some("6"));

        // recomputing from the same snapshot changes nothing
        counter.update_from_cart(Some(&snapshot)).await;
        assert_eq!(counter.item_count(), 6);
        assert_eq!(store.get(CART_COUNT_KEY).await.as_deref(), Some("6"));
    }

    #[tokio::test]
    async fn test_update_from_missing_cart_keeps_current_count() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = CartCounter::new(store.clone(), None).await;
        counter.set_count(3).await;

        counter.update_from_cart(None).await;

        assert_eq!(counter.item_count(), 3);
        assert_eq!(store.get(CART_COUNT_KEY).await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_update_from_platform_payload() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = CartCounter::new(store, None).await;
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{
                "id": "gid://shop/Cart/abc123",
                "items": [
                    {"id": "line-1", "quantity": 2, "title": "Linen shirt"},
                    {"id": "line-2", "quantity": 1}
                ]
            }"#,
        )
        .unwrap();

        counter.update_from_cart(Some(&snapshot)).await;

        assert_eq!(counter.item_count(), 3);
    }

    #[tokio::test]
    async fn test_request_refresh_bumps_serial_only() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = CartCounter::new(store.clone(), None).await;
        let mut rx = counter.subscribe();

        counter.request_refresh();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().refresh_serial, 1);

        counter.request_refresh();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().refresh_serial, 2);

        // the count and the store are untouched
        assert_eq!(counter.item_count(), 0);
        assert_eq!(store.get(CART_COUNT_KEY).await, None);
    }

    #[tokio::test]
    async fn test_failing_store_never_fails_the_counter() {
        let counter = CartCounter::new(Arc::new(FailingStore), None).await;

        counter.set_count(9).await;
        assert_eq!(counter.item_count(), 9);

        counter
            .update_from_cart(Some(&snapshot_with_quantities(&[4])))
            .await;
        assert_eq!(counter.item_count(), 4);
    }

    #[tokio::test]
    async fn test_observers_share_one_counter() {
        let store = Arc::new(InMemorySessionStore::new());
        let counter = Arc::new(CartCounter::new(store, None).await);

        let mut rx = counter.subscribe();
        let badge = counter.clone();
        let watcher = tokio::spawn(async move {
            rx.changed().await.unwrap();
            let state = *rx.borrow();
            (state, badge.item_count())
        });

        counter.set_count(12).await;

        let (state, seen) = watcher.await.unwrap();
        assert_eq!(state.item_count, 12);
        assert_eq!(seen, 12);
    }
}
