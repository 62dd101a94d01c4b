//! # Cart Model
//!
//! The client-side mirror of the server-owned shopping cart.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Owns Cart State                                 │
//! │                                                                         │
//! │  SERVER (authoritative)              CLIENT (this type)                 │
//! │  ──────────────────────              ──────────────────                 │
//! │  • per-user persistent cart          • ephemeral mirror of last fetch   │
//! │  • add / update / remove / clear     • pure derivations (subtotal,      │
//! │  • computes total_price                weight, counts) for display      │
//! │  • empties cart on order placement   • replaced wholesale on re-fetch   │
//! │                                                                         │
//! │  The client NEVER mutates this mirror directly. Mutations go over       │
//! │  HTTP; the mirror is only replaced by successfully fetched state.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Snapshots
//! `price_at_addition` is frozen by the server when a line is created.
//! Catalog price changes never move a cart line's price; the optional
//! `product` back reference carries the *current* catalog data for display
//! only.

use serde::{Deserialize, Serialize};

use crate::money::Rupiah;
use crate::types::ProductRef;
use crate::weight::Grams;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart, unique by `product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: String,

    /// Quantity in cart, always >= 1 (the server drops lines at zero).
    pub quantity: i64,

    /// Unit price frozen by the server when the line was created.
    /// This is the authoritative price for this line.
    pub price_at_addition: Rupiah,

    /// Current catalog data, attached by the server for display.
    /// Absent when the product was deleted after being carted.
    #[serde(default)]
    pub product: Option<ProductRef>,
}

impl CartItem {
    /// Line total (frozen price × quantity).
    #[inline]
    pub fn line_total(&self) -> Rupiah {
        self.price_at_addition.multiply_quantity(self.quantity)
    }

    /// Unit weight from the catalog back reference, zero when absent.
    #[inline]
    pub fn unit_weight(&self) -> Grams {
        self.product
            .as_ref()
            .map(ProductRef::unit_weight)
            .unwrap_or_default()
    }

    /// Line weight (unit weight × quantity).
    #[inline]
    pub fn line_weight(&self) -> Grams {
        self.unit_weight().multiply_quantity(self.quantity)
    }

    /// Display name, falling back to the product id for deleted products.
    pub fn display_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(self.product_id.as_str())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart mirror as fetched from `GET /cart`.
///
/// ## Invariants
/// - Lines are unique by `product_id` (the server merges repeated adds)
/// - Every line quantity is >= 1
/// - `total_price`, when present, equals the sum of line totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines; ordering carries no meaning.
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Server-computed grand total. Absent on carts that never held an item.
    #[serde(default)]
    pub total_price: Option<Rupiah>,
}

impl Cart {
    /// Creates an empty cart mirror (the state before the first fetch).
    pub fn new() -> Self {
        Cart::default()
    }

    /// Item subtotal derived from line snapshots.
    pub fn subtotal(&self) -> Rupiah {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// The total to display: the server's figure when present, otherwise
    /// the derived subtotal (identical whenever the server invariant holds).
    pub fn total(&self) -> Rupiah {
        self.total_price.unwrap_or_else(|| self.subtotal())
    }

    /// Checks the server-total invariant: `total_price` must equal the sum
    /// of `price_at_addition × quantity` over all lines.
    pub fn is_consistent(&self) -> bool {
        match self.total_price {
            Some(total) => total == self.subtotal(),
            None => true,
        }
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines (the cart badge number).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total shipment weight derived from catalog unit weights.
    pub fn total_weight(&self) -> Grams {
        self.items.iter().map(|i| i.line_weight()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds a line by product id.
    pub fn find_item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart summary for display after a cart-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Rupiah,
    pub total_weight: Grams,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total_weight: cart.total_weight(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ref(id: &str, price: i64, weight: i64) -> ProductRef {
        ProductRef {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Rupiah::new(price),
            weight: Some(weight),
            image: None,
            unit: Some("pcs".to_string()),
        }
    }

    fn test_item(id: &str, price: i64, quantity: i64, weight: i64) -> CartItem {
        CartItem {
            product_id: id.to_string(),
            quantity,
            price_at_addition: Rupiah::new(price),
            product: Some(test_ref(id, price, weight)),
        }
    }

    #[test]
    fn test_subtotal_is_sum_of_frozen_line_totals() {
        let cart = Cart {
            items: vec![
                test_item("p-1", 100_000, 2, 500),
                test_item("p-2", 50_000, 1, 250),
            ],
            total_price: Some(Rupiah::new(250_000)),
        };

        assert_eq!(cart.subtotal(), Rupiah::new(250_000));
        assert!(cart.is_consistent());
    }

    #[test]
    fn test_frozen_price_wins_over_catalog_price() {
        // Catalog price drifted to 120k after the line froze at 100k.
        let mut item = test_item("p-1", 100_000, 2, 500);
        if let Some(p) = item.product.as_mut() {
            p.price = Rupiah::new(120_000);
        }

        assert_eq!(item.line_total(), Rupiah::new(200_000));
    }

    #[test]
    fn test_inconsistent_server_total_detected() {
        let cart = Cart {
            items: vec![test_item("p-1", 100_000, 1, 500)],
            total_price: Some(Rupiah::new(999)),
        };
        assert!(!cart.is_consistent());
    }

    #[test]
    fn test_counts_and_weight() {
        let cart = Cart {
            items: vec![
                test_item("p-1", 100_000, 2, 500),
                test_item("p-2", 50_000, 3, 100),
            ],
            total_price: None,
        };

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 5);
        // 2 × 500g + 3 × 100g
        assert_eq!(cart.total_weight(), Grams::new(1300));
    }

    #[test]
    fn test_empty_cart_displays_zero_total() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total().to_string(), "Rp0");
    }

    #[test]
    fn test_deleted_product_degrades_display() {
        let item = CartItem {
            product_id: "p-gone".to_string(),
            quantity: 1,
            price_at_addition: Rupiah::new(10_000),
            product: None,
        };

        assert_eq!(item.display_name(), "p-gone");
        assert_eq!(item.unit_weight(), Grams::zero());
        // Frozen price still totals correctly without the back reference.
        assert_eq!(item.line_total(), Rupiah::new(10_000));
    }

    #[test]
    fn test_totals_summary() {
        let cart = Cart {
            items: vec![test_item("p-1", 100_000, 2, 500)],
            total_price: Some(Rupiah::new(200_000)),
        };
        let totals = CartTotals::from(&cart);

        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.subtotal, Rupiah::new(200_000));
        assert_eq!(totals.total_weight, Grams::new(1000));
    }
}
