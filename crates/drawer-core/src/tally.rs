//! # Tally Module
//!
//! Row calculator and grand total aggregator.
//!
//! ## Recompute Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input change on row i                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RowInput { bundle, manual }      ← parsed, never negative             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quantity = bundle × 50 + manual                                       │
//! │  subtotal = quantity × face value                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  grand total = Σ subtotal over all 10 rows   ← full recompute          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the two counts per row are stored. Quantity, subtotal and grand total
//! are derived on every read, so there is nothing that can go stale.

use serde::Serialize;

use crate::error::CoreResult;
use crate::money::Yen;
use crate::types::{denomination, Denomination, BUNDLE_SIZE, DENOMINATIONS, DENOMINATION_COUNT};
use crate::validation::{parse_count, parse_optional_count};

// =============================================================================
// Row Input
// =============================================================================

/// The two counts entered for one denomination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowInput {
    /// Number of bundles (always 0 for denominations without bundling).
    pub bundle_count: u32,

    /// Number of loose pieces.
    pub manual_count: u32,
}

impl RowInput {
    /// Builds a row from raw field text for the given denomination.
    ///
    /// The bundle field is ignored when the denomination has no bundles,
    /// even if a value is present.
    ///
    /// ## Example
    /// ```rust
    /// use drawer_core::tally::RowInput;
    /// use drawer_core::types::DENOMINATIONS;
    ///
    /// let coin = &DENOMINATIONS[4]; // 500円
    /// let row = RowInput::parse(coin, Some("2"), Some("3"));
    /// assert_eq!(row.quantity(), 103);
    ///
    /// let bill = &DENOMINATIONS[0]; // 10,000円
    /// let row = RowInput::parse(bill, Some("9"), Some("4"));
    /// assert_eq!(row.bundle_count, 0);
    /// ```
    pub fn parse(denom: &Denomination, bundle_raw: Option<&str>, manual_raw: Option<&str>) -> Self {
        let bundle_count = if denom.supports_bundle {
            parse_optional_count(bundle_raw)
        } else {
            0
        };

        RowInput {
            bundle_count,
            manual_count: parse_optional_count(manual_raw),
        }
    }

    /// Total pieces: `bundle × 50 + manual`.
    #[inline]
    pub fn quantity(&self) -> u64 {
        u64::from(self.bundle_count) * BUNDLE_SIZE + u64::from(self.manual_count)
    }

    /// Computes the displayed quantity and subtotal for this row.
    pub fn compute(&self, index: usize, denom: &Denomination) -> RowTotals {
        let quantity = self.quantity();

        RowTotals {
            index,
            name: denom.name,
            face_value: denom.face_value,
            supports_bundle: denom.supports_bundle,
            bundle_count: self.bundle_count,
            manual_count: self.manual_count,
            quantity,
            subtotal: denom.value().multiply_quantity(quantity),
        }
    }

    /// Checks if both counts are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.bundle_count == 0 && self.manual_count == 0
    }
}

// =============================================================================
// Row Totals
// =============================================================================

/// Everything one table row displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowTotals {
    pub index: usize,
    pub name: &'static str,
    pub face_value: i64,
    pub supports_bundle: bool,
    pub bundle_count: u32,
    pub manual_count: u32,
    /// Pieces in the drawer for this denomination.
    pub quantity: u64,
    /// `quantity × face_value`.
    pub subtotal: Yen,
}

// =============================================================================
// Tally
// =============================================================================

/// The counts for all ten rows of the sheet.
///
/// ## Invariants
/// - Exactly one [`RowInput`] per entry of [`DENOMINATIONS`], same order
/// - Bundle counts on non-bundle rows are always 0
/// - [`Tally::grand_total`] always equals the sum of [`Tally::rows`] subtotals
///
/// A tally is only built through its setters, never deserialized:
/// ```compile_fail
/// fn from_wire<T: serde::de::DeserializeOwned>() {}
/// from_wire::<drawer_core::tally::Tally>();
/// ```
/// ```compile_fail
/// fn from_wire<T: serde::de::DeserializeOwned>() {}
/// from_wire::<drawer_core::tally::RowInput>();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    inputs: [RowInput; DENOMINATION_COUNT],
}

impl Tally {
    /// Creates a tally with every count at zero.
    pub fn new() -> Self {
        Tally::default()
    }

    /// Replaces both counts of a row from raw field text.
    ///
    /// ## Errors
    /// `CoreError::UnknownDenomination` if `index` is not a table row.
    /// The counts themselves never cause an error.
    pub fn set_row(
        &mut self,
        index: usize,
        bundle_raw: Option<&str>,
        manual_raw: Option<&str>,
    ) -> CoreResult<RowTotals> {
        let denom = denomination(index)?;
        self.inputs[index] = RowInput::parse(denom, bundle_raw, manual_raw);
        Ok(self.inputs[index].compute(index, denom))
    }

    /// Updates only the bundle field of a row.
    ///
    /// On a denomination without bundles the value is ignored and the row
    /// is returned unchanged.
    pub fn set_bundle(&mut self, index: usize, raw: &str) -> CoreResult<RowTotals> {
        let denom = denomination(index)?;
        if denom.supports_bundle {
            self.inputs[index].bundle_count = parse_count(raw);
        }
        Ok(self.inputs[index].compute(index, denom))
    }

    /// Updates only the manual (loose pieces) field of a row.
    pub fn set_manual(&mut self, index: usize, raw: &str) -> CoreResult<RowTotals> {
        let denom = denomination(index)?;
        self.inputs[index].manual_count = parse_count(raw);
        Ok(self.inputs[index].compute(index, denom))
    }

    /// Returns the computed totals for one row.
    pub fn row(&self, index: usize) -> CoreResult<RowTotals> {
        let denom = denomination(index)?;
        Ok(self.inputs[index].compute(index, denom))
    }

    /// Returns the computed totals for every row, in table order.
    pub fn rows(&self) -> Vec<RowTotals> {
        self.inputs
            .iter()
            .zip(DENOMINATIONS.iter())
            .enumerate()
            .map(|(i, (input, denom))| input.compute(i, denom))
            .collect()
    }

    /// Sums every row subtotal.
    ///
    /// Always a full recompute over the ten rows; calling it twice without a
    /// change in between yields the same value.
    pub fn grand_total(&self) -> Yen {
        self.inputs
            .iter()
            .zip(DENOMINATIONS.iter())
            .map(|(input, denom)| denom.value().multiply_quantity(input.quantity()))
            .sum()
    }

    /// Total pieces across all rows.
    pub fn total_pieces(&self) -> u64 {
        self.inputs.iter().map(RowInput::quantity).sum()
    }

    /// Sets every count back to zero.
    pub fn clear(&mut self) {
        self.inputs = [RowInput::default(); DENOMINATION_COUNT];
    }

    /// Checks if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.inputs.iter().all(RowInput::is_zero)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::index_of_face_value;

    fn idx(face_value: i64) -> usize {
        index_of_face_value(face_value).unwrap()
    }

    #[test]
    fn test_bundle_row_math() {
        let mut tally = Tally::new();
        let row = tally.set_row(idx(500), Some("2"), Some("3")).unwrap();

        assert_eq!(row.quantity, 103);
        assert_eq!(row.subtotal.yen(), 51_500);
    }

    #[test]
    fn test_bundle_formula_holds_across_rows() {
        for (i, denom) in DENOMINATIONS.iter().enumerate().filter(|(_, d)| d.supports_bundle) {
            for (b, m) in [(0u32, 0u32), (1, 0), (0, 49), (7, 13)] {
                let mut tally = Tally::new();
                let row = tally
                    .set_row(i, Some(&b.to_string()), Some(&m.to_string()))
                    .unwrap();
                let expected_qty = 50 * u64::from(b) + u64::from(m);
                assert_eq!(row.quantity, expected_qty);
                assert_eq!(row.subtotal.yen(), denom.face_value * expected_qty as i64);
            }
        }
    }

    #[test]
    fn test_non_bundle_row_ignores_bundle_input() {
        let mut tally = Tally::new();
        let row = tally.set_row(idx(10_000), Some("5"), Some("4")).unwrap();

        assert_eq!(row.bundle_count, 0);
        assert_eq!(row.quantity, 4);
        assert_eq!(row.subtotal.yen(), 40_000);

        let row = tally.set_bundle(idx(10_000), "3").unwrap();
        assert_eq!(row.quantity, 4);
    }

    #[test]
    fn test_grand_total_example() {
        let mut tally = Tally::new();
        tally.set_row(idx(500), Some("2"), Some("3")).unwrap();
        tally.set_row(idx(10_000), None, Some("4")).unwrap();

        assert_eq!(tally.grand_total().yen(), 91_500);
    }

    #[test]
    fn test_grand_total_matches_rows_and_is_idempotent() {
        let mut tally = Tally::new();
        for (i, _) in DENOMINATIONS.iter().enumerate() {
            tally
                .set_row(i, Some(&(i % 3).to_string()), Some(&(i * 7).to_string()))
                .unwrap();
        }

        let from_rows: Yen = tally.rows().iter().map(|r| r.subtotal).sum();
        let first = tally.grand_total();
        let second = tally.grand_total();

        assert_eq!(first, from_rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_input_equals_empty() {
        let mut a = Tally::new();
        let mut b = Tally::new();

        a.set_row(idx(100), Some("abc"), Some("x1")).unwrap();
        b.set_row(idx(100), Some(""), None).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.row(idx(100)).unwrap().quantity, 0);
    }

    #[test]
    fn test_single_field_updates() {
        let mut tally = Tally::new();
        tally.set_bundle(idx(10), "1").unwrap();
        let row = tally.set_manual(idx(10), "5").unwrap();

        assert_eq!(row.quantity, 55);
        assert_eq!(row.subtotal.yen(), 550);

        let row = tally.set_manual(idx(10), "oops").unwrap();
        assert_eq!(row.quantity, 50);
    }

    #[test]
    fn test_unknown_row() {
        let mut tally = Tally::new();
        assert!(matches!(
            tally.set_row(DENOMINATION_COUNT, None, Some("1")),
            Err(CoreError::UnknownDenomination(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut tally = Tally::new();
        tally.set_row(idx(1), Some("1"), Some("1")).unwrap();
        assert!(!tally.is_empty());
        assert_eq!(tally.total_pieces(), 51);

        tally.clear();
        assert!(tally.is_empty());
        assert!(tally.grand_total().is_zero());
        assert!(tally.rows().iter().all(|r| r.quantity == 0));
    }
}
