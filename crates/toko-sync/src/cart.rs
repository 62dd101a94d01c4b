//! # Cart Synchronizer
//!
//! The server owns the cart. This module keeps a local mirror of it, routes
//! every mutation through the backend, and broadcasts a typed signal when a
//! mutation sticks.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Mutation Path                                │
//! │                                                                         │
//! │  caller ──► validate / clamp ──► per-item lock ──► backend request      │
//! │                 │ (rejects locally,                    │                │
//! │                 │  no traffic)                         ▼                │
//! │                 ▼                             success?                  │
//! │             SyncError                    ┌──────┴──────┐                │
//! │                                          ▼             ▼                │
//! │                                   re-fetch cart     error returned,     │
//! │                                   swap mirror       mirror untouched,   │
//! │                                   publish signal    no signal           │
//! │                                                                         │
//! │  Ordering guarantee: the mirror is already updated when the signal      │
//! │  arrives, so subscribers may re-read the mirror instead of patching.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations on the same product are serialized through a per-item async
//! lock, so two rapid quantity taps cannot race each other into the server
//! out of order. Mutations on different products proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::warn;

use toko_core::validation::{clamp_quantity, validate_quantity};
use toko_core::{Cart, CartTotals, CoreError, MAX_CART_ITEMS};

use crate::backend::CartBackend;
use crate::error::SyncResult;
use crate::signal::{CartBus, CartEvent};

/// Server-owned cart with a local mirror and change broadcasting.
pub struct CartSynchronizer {
    backend: Arc<dyn CartBackend>,
    bus: CartBus,
    mirror: RwLock<Cart>,
    item_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CartSynchronizer {
    pub fn new(backend: Arc<dyn CartBackend>) -> Self {
        Self {
            backend,
            bus: CartBus::new(),
            mirror: RwLock::new(Cart::new()),
            item_locks: Mutex::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// New receiver for cart change signals.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.bus.subscribe()
    }

    /// Clone of the current mirror.
    pub async fn snapshot(&self) -> Cart {
        self.mirror.read().await.clone()
    }

    /// Derived totals of the current mirror.
    pub async fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.mirror.read().await)
    }

    /// True when the mirror holds no items.
    pub async fn is_empty(&self) -> bool {
        self.mirror.read().await.is_empty()
    }

    /// Loads the cart from the server and replaces the mirror.
    ///
    /// A load is a read, not a mutation, so no signal is published.
    pub async fn load(&self) -> SyncResult<Cart> {
        let cart = self.backend.fetch_cart().await?;
        self.adopt(cart.clone()).await;
        Ok(cart)
    }

    /// Item count straight from the server, for badge displays.
    pub async fn count(&self) -> SyncResult<i64> {
        self.backend.count().await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart, or increments it if already present.
    pub async fn add_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>> {
        validate_quantity(quantity)?;

        {
            let mirror = self.mirror.read().await;
            if mirror.items.len() >= MAX_CART_ITEMS && mirror.find_item(product_id).is_none() {
                return Err(CoreError::CartTooLarge {
                    max: MAX_CART_ITEMS,
                }
                .into());
            }
        }

        let lock = self.item_lock(product_id).await;
        let _guard = lock.lock().await;

        let message = self.backend.add_item(product_id, quantity).await?;
        self.resync_after_mutation("add").await;
        self.bus.publish(CartEvent::ItemAdded {
            product_id: product_id.to_string(),
        });
        Ok(message)
    }

    /// Sets an item's quantity. Values below one are clamped to one, so a
    /// decrement tap on a single-quantity line holds at one instead of
    /// turning into an implicit removal.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> SyncResult<Option<String>> {
        let quantity = clamp_quantity(quantity);
        validate_quantity(quantity)?;

        let lock = self.item_lock(product_id).await;
        let _guard = lock.lock().await;

        let message = self.backend.update_item(product_id, quantity).await?;
        self.resync_after_mutation("update").await;
        self.bus.publish(CartEvent::QuantityUpdated {
            product_id: product_id.to_string(),
            quantity,
        });
        Ok(message)
    }

    /// Removes an item entirely, regardless of quantity.
    ///
    /// Callers are expected to confirm with the user first; this method
    /// itself removes unconditionally.
    pub async fn remove_item(&self, product_id: &str) -> SyncResult<Option<String>> {
        let lock = self.item_lock(product_id).await;
        let _guard = lock.lock().await;

        let message = self.backend.remove_item(product_id).await?;
        self.resync_after_mutation("remove").await;
        self.bus.publish(CartEvent::ItemRemoved {
            product_id: product_id.to_string(),
        });
        Ok(message)
    }

    /// Empties the cart.
    pub async fn clear(&self) -> SyncResult<Option<String>> {
        let message = self.backend.clear().await?;
        self.resync_after_mutation("clear").await;
        self.bus.publish(CartEvent::Cleared);
        Ok(message)
    }

    // =========================================================================
    // Internals (shared with checkout)
    // =========================================================================

    /// Replaces the mirror wholesale.
    pub(crate) async fn adopt(&self, cart: Cart) {
        *self.mirror.write().await = cart;
    }

    /// Publishes a signal on behalf of checkout.
    pub(crate) fn publish(&self, event: CartEvent) {
        self.bus.publish(event);
    }

    /// Brings the mirror up to date after a mutation the server accepted.
    ///
    /// The mutation already happened, so a failed re-fetch downgrades to a
    /// stale mirror (corrected by the next load) rather than an error.
    async fn resync_after_mutation(&self, operation: &str) {
        match self.backend.fetch_cart().await {
            Ok(cart) => self.adopt(cart).await,
            Err(e) => {
                warn!(operation, error = %e, "Mirror refresh failed, keeping previous snapshot");
            }
        }
    }

    /// Lock guarding mutations of one product line.
    async fn item_lock(&self, product_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.item_locks.lock().await;
        locks
            .entry(product_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use toko_api::ApiError;
    use toko_core::{CartItem, Rupiah};

    use crate::error::SyncError;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fetch,
        Add { product_id: String, quantity: i64 },
        Update { product_id: String, quantity: i64 },
        Remove { product_id: String },
        Clear,
        Count,
    }

    /// In-memory stand-in for the server side of the cart.
    #[derive(Default)]
    struct FakeCartServer {
        cart: Mutex<Cart>,
        calls: std::sync::Mutex<Vec<Call>>,
        fail_mutations: AtomicBool,
        stall: AtomicBool,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeCartServer {
        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        async fn seed(&self, items: Vec<CartItem>) {
            self.cart.lock().await.items = items;
        }

        fn line(product_id: &str, quantity: i64) -> CartItem {
            CartItem {
                product_id: product_id.to_string(),
                quantity,
                price_at_addition: Rupiah::new(10_000),
                product: None,
            }
        }

        async fn enter_mutation(&self) -> SyncResult<()> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(SyncError::Api(ApiError::Network(
                    "connection reset by peer".to_string(),
                )));
            }
            let depth = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(depth, Ordering::SeqCst);
            if self.stall.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl CartBackend for FakeCartServer {
        async fn fetch_cart(&self) -> SyncResult<Cart> {
            self.record(Call::Fetch);
            Ok(self.cart.lock().await.clone())
        }

        async fn add_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>> {
            self.record(Call::Add {
                product_id: product_id.to_string(),
                quantity,
            });
            self.enter_mutation().await?;
            let mut cart = self.cart.lock().await;
            match cart.items.iter_mut().find(|i| i.product_id == product_id) {
                Some(item) => item.quantity += quantity,
                None => cart.items.push(Self::line(product_id, quantity)),
            }
            Ok(Some("Product added to cart".to_string()))
        }

        async fn update_item(&self, product_id: &str, quantity: i64) -> SyncResult<Option<String>> {
            self.record(Call::Update {
                product_id: product_id.to_string(),
                quantity,
            });
            self.enter_mutation().await?;
            let mut cart = self.cart.lock().await;
            match cart.items.iter_mut().find(|i| i.product_id == product_id) {
                Some(item) => item.quantity = quantity,
                None => cart.items.push(Self::line(product_id, quantity)),
            }
            Ok(None)
        }

        async fn remove_item(&self, product_id: &str) -> SyncResult<Option<String>> {
            self.record(Call::Remove {
                product_id: product_id.to_string(),
            });
            self.enter_mutation().await?;
            self.cart
                .lock()
                .await
                .items
                .retain(|i| i.product_id != product_id);
            Ok(Some("Product removed".to_string()))
        }

        async fn clear(&self) -> SyncResult<Option<String>> {
            self.record(Call::Clear);
            self.enter_mutation().await?;
            *self.cart.lock().await = Cart::new();
            Ok(None)
        }

        async fn count(&self) -> SyncResult<i64> {
            self.record(Call::Count);
            Ok(self.cart.lock().await.items.len() as i64)
        }
    }

    fn rig() -> (Arc<FakeCartServer>, Arc<CartSynchronizer>) {
        let server = Arc::new(FakeCartServer::default());
        let sync = Arc::new(CartSynchronizer::new(server.clone()));
        (server, sync)
    }

    #[tokio::test]
    async fn test_add_updates_mirror_and_publishes_one_signal() {
        let (server, sync) = rig();
        let mut rx = sync.subscribe();

        let message = sync.add_item("p-1", 2).await.unwrap();
        assert_eq!(message.as_deref(), Some("Product added to cart"));

        let mirror = sync.snapshot().await;
        assert_eq!(mirror.items.len(), 1);
        assert_eq!(mirror.items[0].quantity, 2);

        assert_eq!(
            rx.recv().await.unwrap(),
            CartEvent::ItemAdded {
                product_id: "p-1".to_string()
            }
        );
        assert!(rx.try_recv().is_err());

        assert_eq!(
            server.calls(),
            vec![
                Call::Add {
                    product_id: "p-1".to_string(),
                    quantity: 2
                },
                Call::Fetch,
            ]
        );
    }

    #[tokio::test]
    async fn test_add_rejects_bad_quantity_without_traffic() {
        let (server, sync) = rig();
        let mut rx = sync.subscribe();

        let err = sync.add_item("p-1", 0).await.unwrap_err();
        assert!(err.is_validation());

        assert!(server.calls().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_add_blocked_when_cart_is_full() {
        let (server, sync) = rig();
        let items = (0..MAX_CART_ITEMS)
            .map(|i| FakeCartServer::line(&format!("item-{}", i), 1))
            .collect();
        server.seed(items).await;
        sync.load().await.unwrap();
        let fetches_so_far = server.calls().len();

        let err = sync.add_item("one-more", 1).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Core(CoreError::CartTooLarge { .. })
        ));
        assert_eq!(server.calls().len(), fetches_so_far);

        // Incrementing an existing line is still allowed at the cap.
        sync.add_item("item-0", 1).await.unwrap();
        assert_eq!(sync.snapshot().await.find_item("item-0").unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_update_clamps_below_one_to_one() {
        let (server, sync) = rig();
        server.seed(vec![FakeCartServer::line("p-1", 3)]).await;
        sync.load().await.unwrap();
        let mut rx = sync.subscribe();

        sync.update_quantity("p-1", 0).await.unwrap();

        // The clamped value is what went over the wire and into the signal.
        assert!(server.calls().contains(&Call::Update {
            product_id: "p-1".to_string(),
            quantity: 1
        }));
        assert_eq!(
            rx.recv().await.unwrap(),
            CartEvent::QuantityUpdated {
                product_id: "p-1".to_string(),
                quantity: 1
            }
        );
        assert_eq!(sync.snapshot().await.find_item("p-1").unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_update_rejects_oversized_quantity() {
        let (server, sync) = rig();
        let err = sync.update_quantity("p-1", 1_000).await.unwrap_err();
        assert!(err.is_validation());
        assert!(server.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_mirror_and_stays_silent() {
        let (server, sync) = rig();
        server.seed(vec![FakeCartServer::line("p-1", 3)]).await;
        sync.load().await.unwrap();
        let mut rx = sync.subscribe();

        server.fail_mutations.store(true, Ordering::SeqCst);
        let err = sync.update_quantity("p-1", 5).await.unwrap_err();
        assert!(err.is_network());

        assert_eq!(sync.snapshot().await.find_item("p-1").unwrap().quantity, 3);
        assert!(rx.try_recv().is_err());
        // No mirror re-fetch happens after a failed mutation.
        assert_eq!(
            server.calls().last(),
            Some(&Call::Update {
                product_id: "p-1".to_string(),
                quantity: 5
            })
        );
    }

    #[tokio::test]
    async fn test_remove_and_clear_publish_their_signals() {
        let (server, sync) = rig();
        server
            .seed(vec![
                FakeCartServer::line("p-1", 1),
                FakeCartServer::line("p-2", 2),
            ])
            .await;
        sync.load().await.unwrap();
        let mut rx = sync.subscribe();

        sync.remove_item("p-1").await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            CartEvent::ItemRemoved {
                product_id: "p-1".to_string()
            }
        );
        assert_eq!(sync.snapshot().await.items.len(), 1);

        sync.clear().await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), CartEvent::Cleared);
        assert!(sync.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_is_silent() {
        let (server, sync) = rig();
        server.seed(vec![FakeCartServer::line("p-1", 4)]).await;
        let mut rx = sync.subscribe();

        let cart = sync.load().await.unwrap();
        assert_eq!(cart.total_quantity(), 4);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_count_reads_from_server() {
        let (server, sync) = rig();
        server
            .seed(vec![
                FakeCartServer::line("p-1", 1),
                FakeCartServer::line("p-2", 9),
            ])
            .await;
        assert_eq!(sync.count().await.unwrap(), 2);
        assert_eq!(server.calls(), vec![Call::Count]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_item_mutations_are_serialized() {
        let (server, sync) = rig();
        server.seed(vec![FakeCartServer::line("p-1", 1)]).await;
        server.stall.store(true, Ordering::SeqCst);

        let first = tokio::spawn({
            let sync = sync.clone();
            async move { sync.update_quantity("p-1", 2).await }
        });
        let second = tokio::spawn({
            let sync = sync.clone();
            async move { sync.update_quantity("p-1", 3).await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(server.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_items_mutate_concurrently() {
        let (server, sync) = rig();
        server.stall.store(true, Ordering::SeqCst);

        let first = tokio::spawn({
            let sync = sync.clone();
            async move { sync.add_item("p-1", 1).await }
        });
        let second = tokio::spawn({
            let sync = sync.clone();
            async move { sync.add_item("p-2", 1).await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(server.max_in_flight.load(Ordering::SeqCst), 2);
    }
}
