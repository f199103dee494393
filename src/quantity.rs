//! Quantities
//!
//! Items are either sold by count (an exact number of units) or by weight (as
//! measured by a scale). A [`Quantity`] carries which of the two it is, so a
//! weight can never be silently read as a count or the other way round.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Ways a stocked item can be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleMode {
    /// Sold as an integral number of units.
    ByCount,

    /// Sold by weight as measured by a scale.
    ByWeight,
}

impl fmt::Display for SaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleMode::ByCount => f.write_str("by count"),
            SaleMode::ByWeight => f.write_str("by weight"),
        }
    }
}

/// Errors raised when a quantity does not suit the item it was scanned for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// The quantity's kind disagrees with the item's sale mode.
    #[error("item is sold {expected}, but the quantity was measured {found}")]
    KindMismatch {
        /// Sale mode the item was declared with.
        expected: SaleMode,

        /// Kind of quantity that was supplied.
        found: SaleMode,
    },
}

/// A scanned or accumulated amount of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Whole units, for items sold by count.
    Count(u32),

    /// A measured weight, for items sold by weight.
    Weight(Decimal),
}

impl Quantity {
    /// A single counted unit.
    pub const ONE: Quantity = Quantity::Count(1);

    /// The sale mode this quantity is measured in.
    pub fn kind(&self) -> SaleMode {
        match self {
            Quantity::Count(_) => SaleMode::ByCount,
            Quantity::Weight(_) => SaleMode::ByWeight,
        }
    }

    /// The zero quantity for a sale mode.
    pub fn zero(mode: SaleMode) -> Self {
        match mode {
            SaleMode::ByCount => Quantity::Count(0),
            SaleMode::ByWeight => Quantity::Weight(Decimal::ZERO),
        }
    }

    /// The quantity as a decimal, for price arithmetic.
    pub fn as_decimal(&self) -> Decimal {
        match self {
            Quantity::Count(count) => Decimal::from(*count),
            Quantity::Weight(weight) => *weight,
        }
    }

    /// Add two quantities of the same kind.
    ///
    /// Returns `None` when the kinds differ or the sum overflows.
    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        match (self, other) {
            (Quantity::Count(a), Quantity::Count(b)) => a.checked_add(b).map(Quantity::Count),
            (Quantity::Weight(a), Quantity::Weight(b)) => a.checked_add(b).map(Quantity::Weight),
            _ => None,
        }
    }
}

impl From<u32> for Quantity {
    fn from(count: u32) -> Self {
        Quantity::Count(count)
    }
}

impl From<Decimal> for Quantity {
    fn from(weight: Decimal) -> Self {
        Quantity::Weight(weight)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(count) => write!(f, "{count}"),
            Quantity::Weight(weight) => write!(f, "{weight}"),
        }
    }
}

/// Check that `quantity` is measured the way an item sold by `mode` must be.
///
/// # Errors
///
/// Returns [`QuantityError::KindMismatch`] when the quantity is a weight for
/// a counted item, or a count for a weighed item.
pub fn validate(quantity: Quantity, mode: SaleMode) -> Result<(), QuantityError> {
    let found = quantity.kind();

    if found == mode {
        Ok(())
    } else {
        Err(QuantityError::KindMismatch {
            expected: mode,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn count_is_accepted_for_counted_items() -> TestResult {
        validate(Quantity::Count(3), SaleMode::ByCount)?;

        Ok(())
    }

    #[test]
    fn weight_is_accepted_for_weighed_items() -> TestResult {
        validate(Quantity::Weight(dec!(1.25)), SaleMode::ByWeight)?;

        Ok(())
    }

    #[test]
    fn weight_is_rejected_for_counted_items() {
        let result = validate(Quantity::Weight(dec!(0.5)), SaleMode::ByCount);

        assert_eq!(
            result,
            Err(QuantityError::KindMismatch {
                expected: SaleMode::ByCount,
                found: SaleMode::ByWeight,
            })
        );
    }

    #[test]
    fn count_is_rejected_for_weighed_items() {
        let result = validate(Quantity::Count(2), SaleMode::ByWeight);

        assert_eq!(
            result,
            Err(QuantityError::KindMismatch {
                expected: SaleMode::ByWeight,
                found: SaleMode::ByCount,
            })
        );
    }

    #[test]
    fn whole_number_weight_is_still_a_weight() {
        // 2.0 kg is a weight even though it has no fractional part.
        let result = validate(Quantity::Weight(dec!(2.0)), SaleMode::ByCount);

        assert!(matches!(result, Err(QuantityError::KindMismatch { .. })));
    }

    #[test]
    fn checked_add_keeps_kind() {
        assert_eq!(
            Quantity::Count(2).checked_add(Quantity::Count(3)),
            Some(Quantity::Count(5))
        );
        assert_eq!(
            Quantity::Weight(dec!(1.5)).checked_add(Quantity::Weight(dec!(0.25))),
            Some(Quantity::Weight(dec!(1.75)))
        );
    }

    #[test]
    fn checked_add_refuses_mixed_kinds() {
        assert_eq!(
            Quantity::Count(1).checked_add(Quantity::Weight(dec!(1))),
            None
        );
    }

    #[test]
    fn checked_add_refuses_count_overflow() {
        assert_eq!(Quantity::Count(u32::MAX).checked_add(Quantity::ONE), None);
    }

    #[test]
    fn as_decimal_converts_both_kinds() {
        assert_eq!(Quantity::Count(4).as_decimal(), dec!(4));
        assert_eq!(Quantity::Weight(dec!(0.75)).as_decimal(), dec!(0.75));
    }

    #[test]
    fn zero_matches_sale_mode() {
        assert_eq!(Quantity::zero(SaleMode::ByCount), Quantity::Count(0));
        assert_eq!(
            Quantity::zero(SaleMode::ByWeight),
            Quantity::Weight(Decimal::ZERO)
        );
    }
}
