//! # Checkout
//!
//! Turns the server-side cart into an order. The flow is deliberately
//! strict about what happens on each side of the placement request:
//!
//! - Before the request: empty-cart and shipping-form validation run
//!   locally, so a doomed placement never reaches the server.
//! - On success: the receipt is parked in the handoff slot, the cart mirror
//!   is emptied (the server already emptied its side as part of placement),
//!   and `Cleared` + `OrderPlaced` signals go out in that order.
//! - On failure: nothing happens. The mirror, the shipping form held by the
//!   caller, and the receipt slot are all exactly as they were, ready for a
//!   corrected retry by the user.
//!
//! No client-side price arithmetic enters the order. The server computes
//! subtotal, shipping cost and total from its own cart; [`CheckoutSummary`]
//! exists only to show the customer the same numbers beforehand.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use toko_api::PlaceOrderRequest;
use toko_core::validation::validate_shipping_info;
use toko_core::{
    Cart, CoreError, Grams, Order, PaymentMethod, Rupiah, ShippingInfo, ShippingMethod,
};

use crate::backend::OrderBackend;
use crate::cart::CartSynchronizer;
use crate::error::SyncResult;
use crate::signal::CartEvent;

// =============================================================================
// Receipt handoff
// =============================================================================

/// What the confirmation screen needs to know about a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub order_number: String,
    pub total_amount: Rupiah,
}

impl From<&Order> for OrderReceipt {
    fn from(order: &Order) -> Self {
        OrderReceipt {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            total_amount: order.total_amount,
        }
    }
}

/// Single-slot handoff from checkout to the confirmation screen.
///
/// The slot is take-once: the first reader consumes the receipt and any
/// later read sees `None`. A revisit of the confirmation route therefore
/// renders its signed-out/empty state instead of replaying a stale receipt.
#[derive(Debug, Default)]
pub struct ReceiptHandoff {
    slot: Mutex<Option<OrderReceipt>>,
}

impl ReceiptHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a receipt, replacing any unconsumed one.
    pub async fn store(&self, receipt: OrderReceipt) {
        *self.slot.lock().await = Some(receipt);
    }

    /// Consumes the parked receipt, if any.
    pub async fn take(&self) -> Option<OrderReceipt> {
        self.slot.lock().await.take()
    }
}

// =============================================================================
// Checkout summary
// =============================================================================

/// Pre-placement totals for the checkout screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Rupiah,
    pub shipping_method: ShippingMethod,
    pub shipping_cost: Rupiah,
    pub total_amount: Rupiah,
    pub total_weight: Grams,
}

// =============================================================================
// Checkout flow
// =============================================================================

/// Drives the cart-to-order transition.
pub struct Checkout {
    orders: Arc<dyn OrderBackend>,
    cart: Arc<CartSynchronizer>,
    receipts: ReceiptHandoff,
}

impl Checkout {
    pub fn new(orders: Arc<dyn OrderBackend>, cart: Arc<CartSynchronizer>) -> Self {
        Self {
            orders,
            cart,
            receipts: ReceiptHandoff::new(),
        }
    }

    /// The handoff slot the confirmation screen reads from.
    pub fn receipts(&self) -> &ReceiptHandoff {
        &self.receipts
    }

    /// Totals for the current mirror under the chosen shipping method.
    pub async fn summary(&self, shipping_method: ShippingMethod) -> CheckoutSummary {
        let cart = self.cart.snapshot().await;
        let subtotal = cart.total();
        let shipping_cost = shipping_method.cost();
        CheckoutSummary {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            shipping_method,
            shipping_cost,
            total_amount: subtotal + shipping_cost,
            total_weight: cart.total_weight(),
        }
    }

    /// Places the order built from the current cart.
    ///
    /// The shipping form is borrowed, not consumed: after a failure the
    /// caller still holds what the user typed, ready for a corrected
    /// retry. The receipt is stored in the handoff slot before any signal
    /// goes out, so a subscriber routed to the confirmation screen by
    /// `OrderPlaced` always finds it there.
    pub async fn place_order(
        &self,
        shipping_info: &ShippingInfo,
        payment_method: PaymentMethod,
        shipping_method: ShippingMethod,
    ) -> SyncResult<OrderReceipt> {
        if self.cart.is_empty().await {
            return Err(CoreError::EmptyCart.into());
        }
        validate_shipping_info(shipping_info)?;

        let request = PlaceOrderRequest {
            shipping_info: shipping_info.clone(),
            payment_method,
            shipping_method,
        };
        let order = self.orders.place_order(&request).await?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            "Order placed"
        );

        let receipt = OrderReceipt::from(&order);
        self.receipts.store(receipt.clone()).await;

        // Placement emptied the server cart; the mirror follows directly.
        self.cart.adopt(Cart::new()).await;
        self.cart.publish(CartEvent::Cleared);
        self.cart.publish(CartEvent::OrderPlaced {
            order_id: order.id.clone(),
        });

        Ok(receipt)
    }
}
