//! # Cart Change Signals
//!
//! Every successful cart mutation publishes exactly one [`CartEvent`] on the
//! [`CartBus`]. Order placement is the one compound case: it publishes
//! [`CartEvent::Cleared`] for the emptied cart and then
//! [`CartEvent::OrderPlaced`] for the new order.
//!
//! The bus is a fan-out broadcast. Badge widgets, cart screens, and order
//! history views each hold their own receiver and decide independently how
//! to react (re-read the mirror, or patch their own state from the event
//! payload). Publishing never blocks and never fails: with no subscribers
//! the event is simply dropped, and a slow subscriber that lags behind the
//! channel capacity loses the oldest events, not the newest.

use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast channel; a lagging receiver skips past
/// anything older than this.
pub const SIGNAL_BUFFER: usize = 256;

/// A cart change that already happened on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added (or its quantity incremented via add).
    ItemAdded { product_id: String },

    /// An item's quantity was set to a new value.
    QuantityUpdated { product_id: String, quantity: i64 },

    /// An item was removed entirely.
    ItemRemoved { product_id: String },

    /// The cart was emptied.
    Cleared,

    /// Checkout turned the cart into an order.
    OrderPlaced { order_id: String },
}

/// Broadcast bus for cart change signals.
#[derive(Debug)]
pub struct CartBus {
    tx: broadcast::Sender<CartEvent>,
}

impl CartBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_BUFFER);
        Self { tx }
    }

    /// New receiver observing every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: CartEvent) {
        debug!(?event, "Cart signal");
        // No subscribers is a valid state, not an error.
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for CartBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = CartBus::new();
        assert_eq!(bus.receiver_count(), 0);
        bus.publish(CartEvent::Cleared);
    }

    #[tokio::test]
    async fn test_all_subscribers_observe_each_event() {
        let bus = CartBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(CartEvent::ItemAdded {
            product_id: "p-1".to_string(),
        });
        bus.publish(CartEvent::QuantityUpdated {
            product_id: "p-1".to_string(),
            quantity: 3,
        });

        for rx in [&mut first, &mut second] {
            assert_eq!(
                rx.recv().await.unwrap(),
                CartEvent::ItemAdded {
                    product_id: "p-1".to_string()
                }
            );
            assert_eq!(
                rx.recv().await.unwrap(),
                CartEvent::QuantityUpdated {
                    product_id: "p-1".to_string(),
                    quantity: 3
                }
            );
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = CartBus::new();
        bus.publish(CartEvent::Cleared);

        let mut rx = bus.subscribe();
        bus.publish(CartEvent::OrderPlaced {
            order_id: "ord-1".to_string(),
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            CartEvent::OrderPlaced {
                order_id: "ord-1".to_string()
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
