//! Prices
//!
//! Rounding helpers shared by the pricing rules and the receipt. All money is
//! held as exact decimals; rounding only ever happens to whole cents.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::quantity::QuantityError;

/// Errors raised while pricing a line or a total.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The rule cannot price this kind of quantity.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// An amount no longer fits in a decimal.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Number of decimal places money is rounded to.
pub const CENT_PLACES: u32 = 2;

/// Round up (away from zero) to the cent, so the seller never loses a
/// fraction of a cent on a plain sale.
pub fn round_up_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::AwayFromZero)
}

/// Round half-to-even to the cent.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Wrap a decimal amount as money in the same currency as `like`.
pub fn money_like<'a>(amount: Decimal, like: &Money<'a, Currency>) -> Money<'a, Currency> {
    Money::from_decimal(amount, like.currency())
}

/// Multiply two amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit.
pub fn multiply(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::Overflow)
}

/// Add two amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit.
pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b).ok_or(PricingError::Overflow)
}

/// Subtract `b` from `a`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the difference does not fit.
pub fn subtract(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_sub(b).ok_or(PricingError::Overflow)
}

/// Sum line amounts and round the result to the cent.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit.
pub fn total_price<I>(amounts: I) -> Result<Decimal, PricingError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, add)
        .map(round_to_cents)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn round_up_takes_the_next_cent() {
        assert_eq!(round_up_to_cents(dec!(1.996)), dec!(2.00));
        assert_eq!(round_up_to_cents(dec!(1.991)), dec!(2.00));
        assert_eq!(round_up_to_cents(dec!(1.99)), dec!(1.99));
    }

    #[test]
    fn round_up_moves_negative_amounts_away_from_zero() {
        assert_eq!(round_up_to_cents(dec!(-0.201)), dec!(-0.21));
    }

    #[test]
    fn round_to_cents_uses_bankers_rounding() {
        assert_eq!(round_to_cents(dec!(0.645)), dec!(0.64));
        assert_eq!(round_to_cents(dec!(0.655)), dec!(0.66));
        assert_eq!(round_to_cents(dec!(4.5449)), dec!(4.54));
    }

    #[test]
    fn total_price_sums_then_rounds() -> TestResult {
        assert_eq!(total_price([dec!(1.99), dec!(3.98), dec!(0.005)])?, dec!(5.97));

        Ok(())
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_price(std::iter::empty())?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn total_price_overflow_is_an_error() {
        assert_eq!(
            total_price([Decimal::MAX, Decimal::ONE]),
            Err(PricingError::Overflow)
        );
    }

    #[test]
    fn multiply_overflow_is_an_error() {
        assert_eq!(multiply(Decimal::MAX, dec!(5.99)), Err(PricingError::Overflow));
        assert_eq!(multiply(dec!(1.5), dec!(5.99)), Ok(dec!(8.985)));
    }

    #[test]
    fn subtract_overflow_is_an_error() {
        assert_eq!(subtract(Decimal::MIN, Decimal::ONE), Err(PricingError::Overflow));
        assert_eq!(subtract(dec!(1.25), dec!(1.45)), Ok(dec!(-0.20)));
    }

    #[test]
    fn money_like_keeps_currency() {
        let unit = Money::from_minor(199, USD);

        let money = money_like(dec!(3.98), &unit);

        assert_eq!(money.currency(), USD);
        assert_eq!(money, Money::from_minor(398, USD));
    }
}
