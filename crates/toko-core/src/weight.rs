//! # Weight Module
//!
//! Provides the `Grams` type for product and shipment weights.
//!
//! Weights are integer grams end to end, the same way money is integer
//! rupiah: the catalog stores grams, line weights multiply by quantity,
//! and only `Display` converts for the UI.
//!
//! ## Display Rule
//! - Under 1000 grams: plain grams, `500` → `"500 g"`
//! - 1000 grams and up: kilograms with two decimals, `1500` → `"1.50 kg"`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A weight in whole grams.
///
/// Signed to survive arithmetic on adjustments, though catalog weights are
/// always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(i64);

impl Grams {
    /// Creates a weight from whole grams.
    #[inline]
    pub const fn new(grams: i64) -> Self {
        Grams(grams)
    }

    /// Returns the raw gram count.
    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0
    }

    /// Zero weight.
    #[inline]
    pub const fn zero() -> Self {
        Grams(0)
    }

    /// Checks if the weight is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts an optional raw gram count, degrading missing input to zero.
    ///
    /// Catalog rows without a weight must render as `"0 g"`, not fail.
    #[inline]
    pub fn from_optional(grams: Option<i64>) -> Self {
        Grams(grams.unwrap_or(0))
    }

    /// Multiplies a unit weight by a quantity (line weight).
    ///
    /// ## Example
    /// ```rust
    /// use toko_core::weight::Grams;
    ///
    /// let unit = Grams::new(500);
    /// assert_eq!(unit.multiply_quantity(3).grams(), 1500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Grams(self.0 * qty)
    }
}

/// Display renders grams under one kilogram and two-decimal kilograms
/// from there up. Hundredths are truncated, not rounded.
///
/// `500` → `"500 g"`, `1500` → `"1.50 kg"`, `0` → `"0 g"`.
impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() < 1000 {
            write!(f, "{} g", self.0)
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            let abs = self.0.unsigned_abs();
            let kg = abs / 1000;
            let hundredths = (abs % 1000) / 10;
            write!(f, "{}{}.{:02} kg", sign, kg, hundredths)
        }
    }
}

impl Default for Grams {
    fn default() -> Self {
        Grams::zero()
    }
}

impl Add for Grams {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Grams(self.0 + other.0)
    }
}

impl AddAssign for Grams {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Grams {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Grams::zero(), |acc, g| acc + g)
    }
}
