//! Receipt
//!
//! A receipt collects the scans of one checkout transaction. Quantities are
//! kept per item and only priced when the total is asked for, so that
//! discounts see everything bought of an item, however many scans it took.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    catalog::{CatalogError, StockCatalog, StockDefinition},
    pricing::{PricingError, total_price},
    quantity::{self, Quantity, QuantityError},
};

/// Errors raised while scanning or totalling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The quantity does not suit the item.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// A scale reported a weight below zero.
    #[error("negative quantity {quantity} scanned for {identifier}")]
    NegativeQuantity {
        /// Item identifier.
        identifier: String,

        /// Offending quantity.
        quantity: Quantity,
    },

    /// The accumulated quantity of an item no longer fits.
    #[error("quantity of {0} overflowed")]
    QuantityOverflow(String),

    /// The price of an item's line no longer fits.
    #[error("price of {0} overflowed")]
    AmountOverflow(String),

    /// The sum of the lines no longer fits.
    #[error("receipt total overflowed")]
    TotalOverflow,
}

/// Quantities scanned for one item, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    identifier: String,
    quantities: SmallVec<[Quantity; 4]>,
    total: Quantity,
}

impl ScanRecord {
    fn new(identifier: String, definition: &StockDefinition) -> Self {
        Self {
            identifier,
            quantities: SmallVec::new(),
            total: Quantity::zero(definition.sale_mode()),
        }
    }

    /// Return the item identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Return every quantity scanned, in order.
    pub fn quantities(&self) -> &[Quantity] {
        &self.quantities
    }

    /// Return the sum of the scanned quantities.
    pub fn total_quantity(&self) -> Quantity {
        self.total
    }

    fn push(&mut self, quantity: Quantity) -> Result<(), ReceiptError> {
        let total = self
            .total
            .checked_add(quantity)
            .ok_or_else(|| ReceiptError::QuantityOverflow(self.identifier.clone()))?;

        self.quantities.push(quantity);
        self.total = total;

        Ok(())
    }
}

/// Scans for a single checkout transaction.
#[derive(Debug, Clone)]
pub struct Receipt<'c> {
    catalog: &'c StockCatalog,

    /// Records in the order their item was first scanned.
    records: Vec<ScanRecord>,

    /// Identifier -> index into `records`.
    positions: FxHashMap<String, usize>,
}

impl<'c> Receipt<'c> {
    /// Start an empty receipt against `catalog`.
    pub fn new(catalog: &'c StockCatalog) -> Self {
        Self {
            catalog,
            records: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Scan a single counted unit of an item.
    ///
    /// # Errors
    ///
    /// See [`Receipt::add_scan`].
    pub fn scan(&mut self, identifier: &str) -> Result<(), ReceiptError> {
        self.add_scan(identifier, Quantity::ONE)
    }

    /// Add a scanned quantity of an item.
    ///
    /// A rejected scan leaves the receipt unchanged.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::Catalog`]: the item is not stocked.
    /// - [`ReceiptError::Quantity`]: a weight was scanned for a counted item, or a count for a weighed item.
    /// - [`ReceiptError::NegativeQuantity`]: a weight below zero was scanned.
    /// - [`ReceiptError::QuantityOverflow`]: the item's total quantity no longer fits.
    pub fn add_scan(
        &mut self,
        identifier: &str,
        quantity: impl Into<Quantity>,
    ) -> Result<(), ReceiptError> {
        let quantity = quantity.into();

        self.try_add_scan(identifier, quantity).inspect_err(|err| {
            warn!(item = identifier, %quantity, error = %err, "scan rejected");
        })
    }

    fn try_add_scan(&mut self, identifier: &str, quantity: Quantity) -> Result<(), ReceiptError> {
        let catalog = self.catalog;
        let definition = catalog.lookup(identifier)?;

        quantity::validate(quantity, definition.sale_mode())?;

        if quantity.as_decimal() < Decimal::ZERO {
            return Err(ReceiptError::NegativeQuantity {
                identifier: identifier.to_string(),
                quantity,
            });
        }

        if let Some(record) = self
            .positions
            .get(identifier)
            .and_then(|index| self.records.get_mut(*index))
        {
            record.push(quantity)?;

            debug!(item = identifier, %quantity, total = %record.total_quantity(), "scan recorded");

            return Ok(());
        }

        let mut record = ScanRecord::new(identifier.to_string(), definition);
        record.push(quantity)?;

        debug!(item = identifier, %quantity, total = %record.total_quantity(), "scan recorded");

        self.positions
            .insert(identifier.to_string(), self.records.len());
        self.records.push(record);

        Ok(())
    }

    /// Price everything scanned and return the total, rounded to the cent.
    ///
    /// Each item's rule is applied once to that item's summed quantity. The
    /// receipt is not changed, so calling this again gives the same answer.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::AmountOverflow`]: an item's line price does not fit.
    /// - [`ReceiptError::TotalOverflow`]: the sum of the lines does not fit.
    pub fn total(&self) -> Result<Money<'static, Currency>, ReceiptError> {
        let lines = self
            .records
            .iter()
            .map(|record| self.price_record(record).map(|line| *line.amount()))
            .collect::<Result<SmallVec<[Decimal; 8]>, _>>()?;

        let total = total_price(lines).map_err(|_err| ReceiptError::TotalOverflow)?;
        let total = Money::from_decimal(total, self.catalog.currency());

        debug!(items = self.records.len(), %total, "receipt totalled");

        Ok(total)
    }

    /// Price the scanned quantity of one item.
    ///
    /// An item that is stocked but was never scanned costs nothing.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::Catalog`]: the item is not stocked.
    /// - [`ReceiptError::AmountOverflow`]: the line price does not fit.
    pub fn item_total(&self, identifier: &str) -> Result<Money<'static, Currency>, ReceiptError> {
        self.catalog.lookup(identifier)?;

        match self.record(identifier) {
            Some(record) => self.price_record(record),
            None => Ok(Money::from_decimal(Decimal::ZERO, self.catalog.currency())),
        }
    }

    fn price_record(&self, record: &ScanRecord) -> Result<Money<'static, Currency>, ReceiptError> {
        let definition = self.catalog.lookup(record.identifier())?;
        let quantity = record.total_quantity();

        let line = definition
            .rule()
            .price(definition.unit_price(), quantity)
            .map_err(|err| match err {
                PricingError::Quantity(err) => ReceiptError::Quantity(err),
                PricingError::Overflow => {
                    ReceiptError::AmountOverflow(record.identifier().to_string())
                }
            })?;

        trace!(item = record.identifier(), %quantity, rule = definition.rule().name(), %line, "priced line");

        if *line.amount() < Decimal::ZERO {
            warn!(item = record.identifier(), %line, "discount exceeds price");
        }

        Ok(line)
    }

    /// Return the scan record for an item, if it was scanned.
    pub fn record(&self, identifier: &str) -> Option<&ScanRecord> {
        self.positions
            .get(identifier)
            .and_then(|index| self.records.get(*index))
    }

    /// Return the total scanned quantity of an item, if it was scanned.
    pub fn quantity_of(&self, identifier: &str) -> Option<Quantity> {
        self.record(identifier).map(ScanRecord::total_quantity)
    }

    /// Iterate over scan records in the order items were first scanned.
    pub fn records(&self) -> impl Iterator<Item = &ScanRecord> {
        self.records.iter()
    }

    /// Get the number of distinct items scanned.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return the catalog this receipt scans against.
    pub fn catalog(&self) -> &'c StockCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rust_decimal_macros::dec;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        quantity::SaleMode,
        rules::{AmountOff, ConditionalPercentOff, PricingRule},
    };

    use super::*;

    fn usd(amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, USD)
    }

    fn test_catalog() -> Result<StockCatalog, Box<dyn std::error::Error>> {
        Ok(StockCatalog::with_items(
            USD,
            [
                ("soup", dec!(1.99), SaleMode::ByCount, PricingRule::Standard),
                (
                    "beef",
                    dec!(5.99),
                    SaleMode::ByWeight,
                    AmountOff::new(dec!(0.50))?.into(),
                ),
                (
                    "beans",
                    dec!(1.99),
                    SaleMode::ByCount,
                    ConditionalPercentOff::new(1, 1, Percentage::from(1.0), None)?.into(),
                ),
            ],
        )?)
    }

    #[test]
    fn empty_receipt_totals_zero() -> TestResult {
        let catalog = test_catalog()?;
        let receipt = Receipt::new(&catalog);

        assert!(receipt.is_empty());
        assert_eq!(receipt.total()?, usd(dec!(0)));

        Ok(())
    }

    #[test]
    fn single_standard_item() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.scan("soup")?;

        assert_eq!(receipt.total()?, usd(dec!(1.99)));

        Ok(())
    }

    #[test]
    fn repeated_scans_accumulate() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.scan("soup")?;
        receipt.scan("soup")?;
        receipt.add_scan("soup", 2_u32)?;

        assert_eq!(receipt.len(), 1);
        assert_eq!(receipt.quantity_of("soup"), Some(Quantity::Count(4)));
        assert_eq!(
            receipt.record("soup").map(ScanRecord::quantities),
            Some(&[Quantity::ONE, Quantity::ONE, Quantity::Count(2)][..])
        );
        assert_eq!(receipt.total()?, usd(dec!(7.96)));

        Ok(())
    }

    #[test]
    fn discounts_apply_across_separate_scans() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.scan("beans")?;
        receipt.scan("soup")?;
        receipt.scan("beans")?;

        assert_eq!(receipt.item_total("beans")?, usd(dec!(1.99)));
        assert_eq!(receipt.total()?, usd(dec!(3.98)));

        Ok(())
    }

    #[test]
    fn weights_accumulate() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.add_scan("beef", dec!(1.25))?;
        receipt.add_scan("beef", dec!(0.75))?;

        assert_eq!(receipt.quantity_of("beef"), Some(Quantity::Weight(dec!(2.00))));
        // 2 x 5.49
        assert_eq!(receipt.total()?, usd(dec!(10.98)));

        Ok(())
    }

    #[test]
    fn unknown_item_is_rejected_and_not_recorded() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        let result = receipt.scan("caviar");

        assert_eq!(
            result,
            Err(ReceiptError::Catalog(CatalogError::UnknownItem(
                "caviar".to_string()
            )))
        );
        assert!(receipt.is_empty());

        Ok(())
    }

    #[test]
    fn weight_for_counted_item_is_rejected() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        let result = receipt.add_scan("soup", dec!(1.5));

        assert!(matches!(
            result,
            Err(ReceiptError::Quantity(QuantityError::KindMismatch { .. }))
        ));
        assert_eq!(receipt.quantity_of("soup"), None);

        Ok(())
    }

    #[test]
    fn count_for_weighed_item_is_rejected() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.add_scan("beef", dec!(1.0))?;
        let result = receipt.scan("beef");

        assert!(matches!(
            result,
            Err(ReceiptError::Quantity(QuantityError::KindMismatch { .. }))
        ));
        assert_eq!(receipt.quantity_of("beef"), Some(Quantity::Weight(dec!(1.0))));

        Ok(())
    }

    #[test]
    fn negative_weight_is_rejected() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        let result = receipt.add_scan("beef", dec!(-0.5));

        assert!(matches!(result, Err(ReceiptError::NegativeQuantity { .. })));
        assert!(receipt.is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_count_is_rejected() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.add_scan("soup", u32::MAX)?;
        let result = receipt.scan("soup");

        assert_eq!(
            result,
            Err(ReceiptError::QuantityOverflow("soup".to_string()))
        );
        assert_eq!(receipt.quantity_of("soup"), Some(Quantity::Count(u32::MAX)));

        Ok(())
    }

    #[test]
    fn overflowing_line_price_is_an_error() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.add_scan("beef", Decimal::MAX)?;

        assert_eq!(
            receipt.total(),
            Err(ReceiptError::AmountOverflow("beef".to_string()))
        );
        assert_eq!(
            receipt.item_total("beef"),
            Err(ReceiptError::AmountOverflow("beef".to_string()))
        );

        Ok(())
    }

    #[test]
    fn overflowing_total_is_an_error() -> TestResult {
        let catalog = StockCatalog::with_items(
            USD,
            [
                ("flour", dec!(1), SaleMode::ByWeight, PricingRule::Standard),
                ("sugar", dec!(1), SaleMode::ByWeight, PricingRule::Standard),
            ],
        )?;
        let mut receipt = Receipt::new(&catalog);

        receipt.add_scan("flour", Decimal::MAX)?;
        receipt.add_scan("sugar", Decimal::MAX)?;

        assert_eq!(receipt.item_total("flour")?, usd(Decimal::MAX));
        assert_eq!(receipt.total(), Err(ReceiptError::TotalOverflow));

        Ok(())
    }

    #[test]
    fn total_is_idempotent() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.scan("soup")?;
        receipt.scan("beans")?;
        receipt.add_scan("beef", dec!(0.333))?;

        let first = receipt.total()?;
        let second = receipt.total()?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn item_total_for_unscanned_item_is_zero() -> TestResult {
        let catalog = test_catalog()?;
        let receipt = Receipt::new(&catalog);

        assert_eq!(receipt.item_total("soup")?, usd(dec!(0)));

        Ok(())
    }

    #[test]
    fn item_total_for_unknown_item_errors() -> TestResult {
        let catalog = test_catalog()?;
        let receipt = Receipt::new(&catalog);

        assert!(matches!(
            receipt.item_total("caviar"),
            Err(ReceiptError::Catalog(CatalogError::UnknownItem(_)))
        ));

        Ok(())
    }

    #[test]
    fn records_keep_first_scan_order() -> TestResult {
        let catalog = test_catalog()?;
        let mut receipt = Receipt::new(&catalog);

        receipt.scan("beans")?;
        receipt.scan("soup")?;
        receipt.scan("beans")?;

        let order: Vec<&str> = receipt.records().map(ScanRecord::identifier).collect();

        assert_eq!(order, vec!["beans", "soup"]);

        Ok(())
    }
}
