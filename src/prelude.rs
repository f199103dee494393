//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{CatalogError, StockCatalog, StockDefinition},
    fixtures::{Fixture, FixtureError},
    pricing::PricingError,
    quantity::{Quantity, QuantityError, SaleMode},
    receipt::{Receipt, ReceiptError, ScanRecord},
    rules::{AmountOff, ConditionalPercentOff, PricingRule, RuleError},
};
