//! # Order Aggregation
//!
//! Pure aggregate computation over order slices for the admin dashboard.
//!
//! There is no incremental bookkeeping: every dashboard refresh recomputes
//! from the full order list it just fetched. At storefront scale this is a
//! single pass over a few thousand records and keeps the numbers impossible
//! to drift out of sync.
//!
//! ## Revenue
//! Revenue follows the joint rule in [`crate::status::counts_toward_revenue`]:
//! only orders that are both delivered and paid contribute their
//! `total_amount`. Cancelled orders never contribute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Rupiah;
use crate::status::counts_toward_revenue;
use crate::types::{Order, OrderStatus, PaymentStatus};

// =============================================================================
// Order Stats
// =============================================================================

/// Per-status counts plus realized revenue for the dashboard header cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    /// Sum of `total_amount` over delivered-and-paid orders.
    pub revenue: Rupiah,
}

impl OrderStats {
    /// Computes stats in a single pass over the order slice.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::stats::OrderStats;
    ///
    /// let stats = OrderStats::compute(&[]);
    /// assert_eq!(stats.total_orders, 0);
    /// assert!(stats.revenue.is_zero());
    /// ```
    pub fn compute(orders: &[Order]) -> Self {
        let mut stats = OrderStats::default();

        for order in orders {
            stats.total_orders += 1;
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Shipped => stats.shipped += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }

            if counts_toward_revenue(order.status, order.payment_status) {
                stats.revenue += order.total_amount;
            }
        }

        stats
    }

    /// Count for one fulfillment status (dashboard card lookup).
    pub fn count_for(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }
}

// =============================================================================
// Recent Orders
// =============================================================================

/// One row of the dashboard's recent-orders table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: String,
    pub order_number: String,
    /// Recipient name from the shipping snapshot.
    pub customer_name: String,
    pub total_amount: Rupiah,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for RecentOrder {
    fn from(order: &Order) -> Self {
        RecentOrder {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name().to_string(),
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            created_at: order.created_at,
        }
    }
}

/// Projects the most recent orders, newest first, capped at `limit`.
///
/// Input ordering does not matter; rows are sorted by `created_at`
/// descending before truncation.
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<RecentOrder> {
    let mut refs: Vec<&Order> = orders.iter().collect();
    refs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    refs.into_iter().take(limit).map(RecentOrder::from).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
