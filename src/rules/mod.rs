//! Pricing Rules
//!
//! Every stocked item carries one [`PricingRule`], which prices the total
//! quantity of that item on a receipt. Rule parameters are checked when the
//! rule is built, so a rule that exists is always valid.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{PricingError, money_like, multiply, round_up_to_cents},
    quantity::{Quantity, SaleMode},
};

pub mod amount_off;
pub mod limit;
pub mod percent_off;

pub use amount_off::AmountOff;
pub use percent_off::ConditionalPercentOff;

/// Invalid pricing rule parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// Percentage off must be above 0% and at most 100% (given as a fraction).
    #[error("percentage off must be above 0% and at most 100%, got {0}")]
    PercentOutOfRange(Decimal),

    /// At least one full-price item is needed to trigger the discount.
    #[error("minimum items must be at least 1")]
    ZeroMinItems,

    /// At least one item must be discounted.
    #[error("discounted items must be at least 1")]
    ZeroDiscountedItems,

    /// A limit smaller than one group can never be honoured.
    #[error("limit {limit} is smaller than one discount group of {group} items")]
    LimitBelowGroupSize {
        /// Requested limit.
        limit: u32,

        /// Size of one discount group.
        group: u64,
    },

    /// Amount off must not be negative.
    #[error("amount off must not be negative, got {0}")]
    NegativeAmountOff(Decimal),

    /// The rule cannot price items sold this way.
    #[error("{rule} pricing cannot be used for items sold {mode}")]
    UnsupportedSaleMode {
        /// Rule name.
        rule: &'static str,

        /// Sale mode the item was declared with.
        mode: SaleMode,
    },
}

/// How a stocked item is priced.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PricingRule {
    /// Unit price times quantity, rounded up to the cent.
    #[default]
    Standard,

    /// A fixed amount off each eligible unit.
    AmountOff(AmountOff),

    /// Buy some, get some at a percentage off.
    ConditionalPercentOff(ConditionalPercentOff),
}

impl PricingRule {
    /// Return the rule's name.
    pub fn name(&self) -> &'static str {
        match self {
            PricingRule::Standard => "standard",
            PricingRule::AmountOff(_) => "amount off",
            PricingRule::ConditionalPercentOff(_) => "conditional percent off",
        }
    }

    /// Check that the rule can price items sold by `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnsupportedSaleMode`] when a conditional percent-off
    /// rule is given to an item sold by weight.
    pub fn check_sale_mode(&self, mode: SaleMode) -> Result<(), RuleError> {
        match (self, mode) {
            (PricingRule::ConditionalPercentOff(_), SaleMode::ByWeight) => {
                Err(RuleError::UnsupportedSaleMode {
                    rule: self.name(),
                    mode,
                })
            }
            _ => Ok(()),
        }
    }

    /// Price the total `quantity` of one item at `unit_price`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Quantity`]: a conditional percent-off rule was asked
    ///   to price a weight.
    /// - [`PricingError::Overflow`]: the line amount does not fit.
    pub fn price<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: Quantity,
    ) -> Result<Money<'a, Currency>, PricingError> {
        match self {
            PricingRule::Standard => {
                let amount = multiply(*unit_price.amount(), quantity.as_decimal())?;

                Ok(money_like(round_up_to_cents(amount), unit_price))
            }
            PricingRule::AmountOff(amount_off) => amount_off.price(unit_price, quantity),
            PricingRule::ConditionalPercentOff(percent_off) => {
                percent_off.price(unit_price, quantity)
            }
        }
    }
}

impl From<AmountOff> for PricingRule {
    fn from(rule: AmountOff) -> Self {
        PricingRule::AmountOff(rule)
    }
}

impl From<ConditionalPercentOff> for PricingRule {
    fn from(rule: ConditionalPercentOff) -> Self {
        PricingRule::ConditionalPercentOff(rule)
    }
}
