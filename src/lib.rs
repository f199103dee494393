//! Checkout
//!
//! Checkout is a pricing engine for retail receipts. Items are looked up in a
//! [`catalog::StockCatalog`], scanned onto a [`receipt::Receipt`], and priced
//! per item by a [`rules::PricingRule`] once the total is asked for.

pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod quantity;
pub mod receipt;
pub mod rules;
pub mod utils;
