//! Stock Catalog
//!
//! Everything the store sells, keyed by the identifier the scanner reports.
//! Receipts borrow the catalog, so it cannot change while a sale is running.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    quantity::SaleMode,
    rules::{PricingRule, RuleError},
};

/// Errors raised while building or reading the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No item is stocked under this identifier.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// An item was defined twice.
    #[error("item {0} is already defined")]
    DuplicateItem(String),

    /// Unit prices must not be negative.
    #[error("item {identifier} has a negative unit price {price}")]
    NegativePrice {
        /// Item identifier.
        identifier: String,

        /// Offending price.
        price: Decimal,
    },

    /// The item's pricing rule is invalid for it.
    #[error("item {identifier} has an invalid pricing rule")]
    InvalidRule {
        /// Item identifier.
        identifier: String,

        /// Why the rule was refused.
        #[source]
        source: RuleError,
    },
}

/// A stocked item: how much it costs, how it is sold and how it is priced.
#[derive(Debug, Clone, PartialEq)]
pub struct StockDefinition {
    unit_price: Money<'static, Currency>,
    sale_mode: SaleMode,
    rule: PricingRule,
}

impl StockDefinition {
    /// Return the price of one unit (or one unit of weight).
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Return how the item is sold.
    pub fn sale_mode(&self) -> SaleMode {
        self.sale_mode
    }

    /// Return the item's pricing rule.
    pub fn rule(&self) -> &PricingRule {
        &self.rule
    }
}

/// Catalog of stocked items in a single currency.
#[derive(Debug, Clone)]
pub struct StockCatalog {
    currency: &'static Currency,
    items: FxHashMap<String, StockDefinition>,
}

impl StockCatalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            items: FxHashMap::default(),
        }
    }

    /// Create a catalog from `(identifier, unit price, sale mode, rule)` entries.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] raised by [`StockCatalog::define`].
    pub fn with_items<I, S>(currency: &'static Currency, items: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, Decimal, SaleMode, PricingRule)>,
        S: Into<String>,
    {
        let mut catalog = Self::new(currency);

        for (identifier, unit_price, sale_mode, rule) in items {
            catalog.define(identifier, unit_price, sale_mode, rule)?;
        }

        Ok(catalog)
    }

    /// Add an item to the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateItem`]: the identifier is already defined.
    /// - [`CatalogError::NegativePrice`]: the unit price is below zero.
    /// - [`CatalogError::InvalidRule`]: the rule cannot price items sold by `sale_mode`.
    pub fn define(
        &mut self,
        identifier: impl Into<String>,
        unit_price: Decimal,
        sale_mode: SaleMode,
        rule: impl Into<PricingRule>,
    ) -> Result<&StockDefinition, CatalogError> {
        let identifier = identifier.into();
        let rule = rule.into();

        if self.items.contains_key(&identifier) {
            return Err(CatalogError::DuplicateItem(identifier));
        }

        if unit_price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice {
                identifier,
                price: unit_price,
            });
        }

        if let Err(source) = rule.check_sale_mode(sale_mode) {
            return Err(CatalogError::InvalidRule { identifier, source });
        }

        debug!(item = %identifier, %unit_price, %sale_mode, rule = rule.name(), "defined stock item");

        let definition = StockDefinition {
            unit_price: Money::from_decimal(unit_price, self.currency),
            sale_mode,
            rule,
        };

        Ok(self.items.entry(identifier).or_insert(definition))
    }

    /// Look up an item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if nothing is stocked under `identifier`.
    pub fn lookup(&self, identifier: &str) -> Result<&StockDefinition, CatalogError> {
        self.items
            .get(identifier)
            .ok_or_else(|| CatalogError::UnknownItem(identifier.to_string()))
    }

    /// Check whether an item is stocked.
    pub fn contains(&self, identifier: &str) -> bool {
        self.items.contains_key(identifier)
    }

    /// Get the number of stocked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is stocked.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the catalog currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Iterate over identifiers and their definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StockDefinition)> {
        self.items
            .iter()
            .map(|(identifier, definition)| (identifier.as_str(), definition))
    }
}
