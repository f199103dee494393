//! Amount-off pricing
//!
//! Takes a fixed amount off the unit price of every eligible unit. With a
//! limit, only the first `limit` units (or weight units) are discounted.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PricingError, add, money_like, multiply, round_to_cents, subtract},
    quantity::Quantity,
    rules::{RuleError, limit::allocate},
};

/// Fixed amount off each eligible unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountOff {
    amount: Decimal,
    limit: Option<u32>,
}

impl AmountOff {
    /// Create an amount-off rule without a limit.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NegativeAmountOff`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, RuleError> {
        Self::with_limit(amount, None)
    }

    /// Create an amount-off rule capped at `limit` discounted units.
    ///
    /// A limit of zero is treated as no limit.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NegativeAmountOff`] if `amount` is below zero.
    pub fn with_limit(amount: Decimal, limit: Option<u32>) -> Result<Self, RuleError> {
        if amount < Decimal::ZERO {
            return Err(RuleError::NegativeAmountOff(amount));
        }

        Ok(Self { amount, limit })
    }

    /// Return the amount taken off each unit.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Return the purchase limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Price `quantity` units at `unit_price` less the amount off.
    ///
    /// The discounted unit price is not floored at zero: an amount off larger
    /// than the unit price gives a negative line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line amount does not fit.
    pub fn price<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: Quantity,
    ) -> Result<Money<'a, Currency>, PricingError> {
        let unit = *unit_price.amount();
        let discounted_unit = subtract(unit, self.amount)?;

        let (discounted, full) = match quantity {
            Quantity::Count(count) => {
                let (discounted, full) = allocate(self.limit, count, 0);
                (Decimal::from(discounted), Decimal::from(full))
            }
            Quantity::Weight(weight) => {
                allocate(self.limit.map(Decimal::from), weight, Decimal::ZERO)
            }
        };

        let amount = add(
            multiply(discounted_unit, discounted)?,
            multiply(unit, full)?,
        )?;

        Ok(money_like(round_to_cents(amount), unit_price))
    }
}
