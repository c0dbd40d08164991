//! # Money Module
//!
//! Provides the `Yen` type for monetary values in the drawer.
//!
//! ## Why Integer Yen?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Yen has no minor unit in circulation: the 1円 coin is the smallest    │
//! │  thing that can sit in a drawer. Every amount is a whole number.       │
//! │                                                                         │
//! │    quantity × face value  = row subtotal   (integer × integer)         │
//! │    Σ row subtotals        = grand total    (integer sum)               │
//! │                                                                         │
//! │  No floats, no rounding, no precision loss.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drawer_core::money::Yen;
//!
//! let coin = Yen::from_yen(500);
//! let subtotal = coin.multiply_quantity(103);
//! assert_eq!(subtotal.yen(), 51_500);
//! assert_eq!(subtotal.grouped(), "51,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Yen Type
// =============================================================================

/// A monetary value in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: Same width as the rest of the stack; a full drawer of
///   saturated counts still fits comfortably
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Yen(i64);

impl Yen {
    /// Creates a value from whole yen.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Yen;
    ///
    /// assert_eq!(Yen::from_yen(10_000).yen(), 10_000);
    /// ```
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Yen(yen)
    }

    /// Returns the value in whole yen.
    #[inline]
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Returns zero yen.
    #[inline]
    pub const fn zero() -> Self {
        Yen(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a face value by a piece count.
    ///
    /// Saturates instead of wrapping; counts are clamped well below the
    /// point where this matters, but a bad caller must not flip the sign.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Yen;
    ///
    /// let bill = Yen::from_yen(10_000);
    /// assert_eq!(bill.multiply_quantity(4).yen(), 40_000);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u64) -> Self {
        let qty = i64::try_from(qty).unwrap_or(i64::MAX);
        Yen(self.0.saturating_mul(qty))
    }

    /// Formats the amount with thousands separators (`1234567` → `1,234,567`).
    ///
    /// This is the grouping `toLocaleString("ja-JP")` produces for integers,
    /// and it is what every monetary line of the summary uses.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::money::Yen;
    ///
    /// assert_eq!(Yen::from_yen(0).grouped(), "0");
    /// assert_eq!(Yen::from_yen(999).grouped(), "999");
    /// assert_eq!(Yen::from_yen(91_500).grouped(), "91,500");
    /// assert_eq!(Yen::from_yen(-1_000).grouped(), "-1,000");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            out.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `¥91,500`.
///
/// ## Note
/// This is for logs and debugging. The summary uses [`Yen::grouped`] with
/// locale labels around it.
impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.grouped())
    }
}

impl Default for Yen {
    fn default() -> Self {
        Yen::zero()
    }
}

impl Add for Yen {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Yen(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Yen {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u64> for Yen {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Yen {
    fn sum<I: Iterator<Item = Yen>>(iter: I) -> Self {
        iter.fold(Yen::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Yen> for Yen {
    fn sum<I: Iterator<Item = &'a Yen>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(Yen::from_yen(1).grouped(), "1");
        assert_eq!(Yen::from_yen(1_000).grouped(), "1,000");
        assert_eq!(Yen::from_yen(51_500).grouped(), "51,500");
        assert_eq!(Yen::from_yen(100_000).grouped(), "100,000");
        assert_eq!(Yen::from_yen(1_234_567).grouped(), "1,234,567");
        assert_eq!(Yen::from_yen(-51_500).grouped(), "-51,500");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Yen::from_yen(91_500)), "¥91,500");
        assert_eq!(format!("{}", Yen::zero()), "¥0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Yen::from_yen(40_000);
        let b = Yen::from_yen(51_500);
        assert_eq!((a + b).yen(), 91_500);

        let mut c = Yen::zero();
        c += a;
        assert_eq!(c, a);

        assert_eq!((Yen::from_yen(500) * 103).yen(), 51_500);
    }

    #[test]
    fn test_sum() {
        let parts = [Yen::from_yen(1), Yen::from_yen(10), Yen::from_yen(100)];
        let total: Yen = parts.iter().sum();
        assert_eq!(total.yen(), 111);
    }

    #[test]
    fn test_multiply_saturates() {
        let big = Yen::from_yen(10_000).multiply_quantity(u64::MAX);
        assert_eq!(big.yen(), i64::MAX);
    }
}
