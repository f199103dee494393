//! Conditional percent-off pricing
//!
//! "Buy `min_items`, get `discounted_items` at `percent_off` off", repeating in
//! groups of `min_items + discounted_items`. A trailing partial group only earns
//! discounted units once it has gone past `min_items`.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PricingError, add, money_like, multiply, round_to_cents},
    quantity::{Quantity, QuantityError, SaleMode},
    rules::{RuleError, limit::allocate},
};

/// Buy some, get some at a percentage off.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalPercentOff {
    min_items: u32,
    discounted_items: u32,
    /// Fraction taken off, in `(0, 1]`.
    percent_off: Decimal,
    limit: Option<u32>,
}

impl ConditionalPercentOff {
    /// Create a conditional percent-off rule.
    ///
    /// `percent_off` is a fraction: `Percentage::from(0.5)` is half off and
    /// `Percentage::from(1.0)` makes the discounted items free. `limit` caps
    /// the units the promotion may cover: each whole group within it allows
    /// one discounted unit.
    ///
    /// # Errors
    ///
    /// - [`RuleError::PercentOutOfRange`]: the percentage is not above 0% and at most 100%.
    /// - [`RuleError::ZeroMinItems`]: `min_items` is zero.
    /// - [`RuleError::ZeroDiscountedItems`]: `discounted_items` is zero.
    /// - [`RuleError::LimitBelowGroupSize`]: `limit` is smaller than one full group.
    pub fn new(
        min_items: u32,
        discounted_items: u32,
        percent_off: Percentage,
        limit: Option<u32>,
    ) -> Result<Self, RuleError> {
        let percent_off = percent_off * Decimal::ONE;

        if percent_off <= Decimal::ZERO || percent_off > Decimal::ONE {
            return Err(RuleError::PercentOutOfRange(percent_off));
        }

        if min_items == 0 {
            return Err(RuleError::ZeroMinItems);
        }

        if discounted_items == 0 {
            return Err(RuleError::ZeroDiscountedItems);
        }

        let group = u64::from(min_items) + u64::from(discounted_items);

        if let Some(limit) = limit
            && u64::from(limit) < group
        {
            return Err(RuleError::LimitBelowGroupSize { limit, group });
        }

        Ok(Self {
            min_items,
            discounted_items,
            percent_off,
            limit,
        })
    }

    /// Return the number of full-price items needed before the discount applies.
    pub fn min_items(&self) -> u32 {
        self.min_items
    }

    /// Return the number of discounted items each group earns.
    pub fn discounted_items(&self) -> u32 {
        self.discounted_items
    }

    /// Return the percentage taken off discounted items.
    pub fn percent_off(&self) -> Percentage {
        Percentage::from(self.percent_off)
    }

    /// Return the purchase limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Size of one discount group.
    pub fn group_size(&self) -> u64 {
        u64::from(self.min_items) + u64::from(self.discounted_items)
    }

    /// Split `count` units into `(discounted, full_price)`.
    pub fn split(&self, count: u32) -> (u64, u64) {
        let count = u64::from(count);
        let group = self.group_size();
        let discounted_items = u64::from(self.discounted_items);

        let full_groups = (count / group) * discounted_items;
        let partial = (count % group).saturating_sub(u64::from(self.min_items));

        let discounted = full_groups + partial;
        let full = count - discounted;

        // One discounted unit per whole group the limit covers.
        let discount_limit = self.limit.map(|limit| u64::from(limit) / group);

        allocate(discount_limit, discounted, full)
    }

    /// Price `quantity` units at `unit_price`.
    ///
    /// The full-price and discounted subtotals are each rounded to the cent
    /// before being added.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Quantity`]: the quantity is a weight, and groups only
    ///   make sense for whole units.
    /// - [`PricingError::Overflow`]: the line amount does not fit.
    pub fn price<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: Quantity,
    ) -> Result<Money<'a, Currency>, PricingError> {
        let Quantity::Count(count) = quantity else {
            return Err(QuantityError::KindMismatch {
                expected: SaleMode::ByCount,
                found: quantity.kind(),
            }
            .into());
        };

        let (discounted, full) = self.split(count);
        let unit = *unit_price.amount();
        let discounted_unit = multiply(unit, Decimal::ONE - self.percent_off)?;

        let amount = add(
            round_to_cents(multiply(unit, Decimal::from(full))?),
            round_to_cents(multiply(discounted_unit, Decimal::from(discounted))?),
        )?;

        Ok(money_like(amount, unit_price))
    }
}
