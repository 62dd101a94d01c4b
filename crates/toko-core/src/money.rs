//! # Money Module
//!
//! Provides the `Rupiah` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHY NOT f64?                                                           │
//! │                                                                         │
//! │  Floats drift: summing 0.1-style fractions accumulates rounding error,  │
//! │  and a cart total that is off by one rupiah fails the server's          │
//! │  consistency check.                                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    Indonesian rupiah has no minor unit in practice, so every amount     │
//! │    is a whole i64: Rp150.000 is the integer 150000. Addition,           │
//! │    multiplication, and comparison are exact by construction.            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use toko_core::money::Rupiah;
//!
//! // Create from whole rupiah (the only constructor)
//! let price = Rupiah::new(150_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                  // Rp300.000
//! let total = price + Rupiah::new(15_000);  // Rp165.000
//!
//! // Display formatting groups thousands with dots
//! assert_eq!(price.to_string(), "Rp150.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Rupiah Type
// =============================================================================

/// Represents a monetary value in whole Indonesian rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Newtype over i64**: Compiles away, but keeps rupiah from mixing with grams
/// - **Transparent serde**: Serializes as a bare number on the wire
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Rupiah is Used                                 │
/// │                                                                         │
/// │  CartItem.price_at_addition ──► CartItem.line_total ──► Cart.subtotal   │
/// │                                                                         │
/// │  Cart.subtotal + ShippingMethod.cost() ──► Order.total_amount           │
/// │                                                                         │
/// │  Order.total_amount ──► revenue aggregation ──► dashboard display       │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Creates a Rupiah value from a whole-rupiah amount.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// let price = Rupiah::new(150_000);
    /// assert_eq!(price.amount(), 150_000);
    /// ```
    ///
    /// ## Why Whole Rupiah?
    /// The backend carries prices as integers and the currency has no
    /// fractional unit in use. The wire format, calculations, and storage
    /// all use the same integer. Only `Display` adds grouping for the UI.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Rupiah(amount)
    }

    /// Returns the raw whole-rupiah amount.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// let price = Rupiah::new(35_000);
    /// assert_eq!(price.amount(), 35_000);
    /// ```
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// let zero = Rupiah::zero();
    /// assert_eq!(zero.amount(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Rupiah(0)
    }

    /// Converts an optional raw amount, degrading missing input to zero.
    ///
    /// Server responses occasionally omit a total (e.g., a cart that has
    /// never had an item). Display code must render "Rp0" in that case
    /// rather than fail.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// assert_eq!(Rupiah::from_optional(Some(5_000)).amount(), 5_000);
    /// assert_eq!(Rupiah::from_optional(None).to_string(), "Rp0");
    /// ```
    #[inline]
    pub fn from_optional(amount: Option<i64>) -> Self {
        Rupiah(amount.unwrap_or(0))
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// let adjustment = Rupiah::new(-5_000);
    /// assert_eq!(adjustment.abs().amount(), 5_000);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Rupiah(self.0.abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::money::Rupiah;
    ///
    /// let unit_price = Rupiah::new(100_000);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.amount(), 200_000);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Kopi Arabika Rp100.000
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: Rp200.000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Rupiah(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders the storefront currency format:
/// `Rp` prefix, dot-grouped thousands, no fractional digits.
///
/// `150000` → `"Rp150.000"`, `-5000` → `"-Rp5.000"`, `0` → `"Rp0"`.
impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Default rupiah is zero.
impl Default for Rupiah {
    fn default() -> Self {
        Rupiah::zero()
    }
}

/// Addition of two Rupiah values.
impl Add for Rupiah {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Rupiah(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Rupiah {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Rupiah values.
impl Sub for Rupiah {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Rupiah(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Rupiah {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Rupiah {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Rupiah(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Rupiah {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Rupiah(self.0 * qty)
    }
}

/// Summation over an iterator of Rupiah values.
impl std::iter::Sum for Rupiah {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rupiah::zero(), |acc, r| acc + r)
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Groups a non-negative number's digits in threes with dot separators.
///
/// `150000` → `"150.000"`, `1500` → `"1.500"`, `999` → `"999"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
