//! Catalog Fixtures

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{CAD, Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    catalog::StockCatalog,
    fixtures::FixtureError,
    quantity::SaleMode,
    rules::{AmountOff, ConditionalPercentOff, PricingRule, RuleError},
};

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price is given in (e.g., "USD")
    pub currency: String,

    /// Map of item identifier -> item fixture
    pub items: FxHashMap<String, ItemFixture>,
}

/// Stocked item fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Unit price (e.g., "1.99")
    pub price: String,

    /// How the item is sold
    #[serde(default)]
    pub sold: SoldFixture,

    /// How the item is priced
    #[serde(default)]
    pub pricing: PricingFixture,
}

/// How an item is sold
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoldFixture {
    /// By count
    #[default]
    Each,

    /// By weight
    ByWeight,
}

impl From<SoldFixture> for SaleMode {
    fn from(sold: SoldFixture) -> Self {
        match sold {
            SoldFixture::Each => SaleMode::ByCount,
            SoldFixture::ByWeight => SaleMode::ByWeight,
        }
    }
}

/// Pricing rule fixture
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingFixture {
    /// Standard pricing
    #[default]
    Standard,

    /// Fixed amount off each unit
    AmountOff {
        /// Amount off (e.g., "0.45")
        amount: String,

        /// Maximum discounted units
        #[serde(default)]
        limit: Option<u32>,
    },

    /// Buy some, get some at a percentage off
    PercentOff {
        /// Full-price items needed
        buy: u32,

        /// Discounted items earned
        get: u32,

        /// Percentage off (e.g., "50%" or "0.5")
        percent: String,

        /// Maximum units covered
        #[serde(default)]
        limit: Option<u32>,
    },
}

impl PricingFixture {
    /// Build the pricing rule for item `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount or percentage cannot be parsed, or if the
    /// rule parameters are invalid.
    pub fn try_into_rule(self, identifier: &str) -> Result<PricingRule, FixtureError> {
        let invalid_rule = |source: RuleError| FixtureError::InvalidRule {
            item: identifier.to_string(),
            source,
        };

        match self {
            PricingFixture::Standard => Ok(PricingRule::Standard),
            PricingFixture::AmountOff { amount, limit } => {
                let amount = parse_amount(&amount)?;

                Ok(AmountOff::with_limit(amount, limit)
                    .map_err(invalid_rule)?
                    .into())
            }
            PricingFixture::PercentOff {
                buy,
                get,
                percent,
                limit,
            } => {
                let percent = parse_percentage(&percent)?;

                Ok(ConditionalPercentOff::new(buy, get, percent, limit)
                    .map_err(invalid_rule)?
                    .into())
            }
        }
    }
}

impl TryFrom<CatalogFixture> for StockCatalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut catalog = StockCatalog::new(parse_currency(&fixture.currency)?);

        for (identifier, item) in fixture.items {
            let unit_price = parse_amount(&item.price)?;
            let rule = item.pricing.try_into_rule(&identifier)?;

            catalog.define(identifier, unit_price, item.sold.into(), rule)?;
        }

        Ok(catalog)
    }
}

/// Parse an amount string (e.g., "1.99") into an exact decimal
///
/// # Errors
///
/// Returns an error if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}

/// Parse a currency code
///
/// # Errors
///
/// Returns an error if the currency code is not recognized.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "USD" => Ok(USD),
        "CAD" => Ok(CAD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse percentage string (e.g., "50%" or "0.5") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "50%" for 50%
/// - Decimal format: "0.5" for 50%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map(|points| points / Decimal::ONE_HUNDRED)
    } else {
        trimmed.parse::<Decimal>()
    };

    value
        .map(Percentage::from)
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
