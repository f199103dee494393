//! Fixtures
//!
//! Catalogs and scan lists described in YAML, for tests and demos.

use std::{fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogError, StockCatalog},
    fixtures::catalog::{CatalogFixture, parse_amount},
    quantity::Quantity,
    receipt::{Receipt, ReceiptError},
    rules::RuleError,
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or weight format
    #[error("Invalid amount format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid pricing rule parameters
    #[error("Invalid pricing rule for {item}: {source}")]
    InvalidRule {
        /// Item identifier
        item: String,

        /// Why the rule was refused
        source: RuleError,
    },

    /// Catalog construction error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Scanning error
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Wrapper for scans in YAML
#[derive(Debug, Deserialize)]
pub struct ScansFixture {
    /// Scans in order
    pub scans: Vec<ScanFixture>,
}

/// A single scan
///
/// Either a bare identifier (one counted unit), or a map with the identifier
/// and a `count` or a `weight`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScanFixture {
    /// One counted unit
    Unit(String),

    /// Several counted units
    Counted {
        /// Item identifier
        item: String,

        /// Number of units
        count: u32,
    },

    /// A weighed amount (e.g., "1.25")
    Weighed {
        /// Item identifier
        item: String,

        /// Weight
        weight: String,
    },
}

impl ScanFixture {
    /// Convert to an identifier and quantity
    ///
    /// # Errors
    ///
    /// Returns an error if the weight cannot be parsed.
    pub fn try_into_scan(self) -> Result<(String, Quantity), FixtureError> {
        match self {
            ScanFixture::Unit(item) => Ok((item, Quantity::ONE)),
            ScanFixture::Counted { item, count } => Ok((item, Quantity::Count(count))),
            ScanFixture::Weighed { item, weight } => {
                Ok((item, Quantity::Weight(parse_amount(&weight)?)))
            }
        }
    }
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a new fixture loader with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new fixture loader with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a catalog from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an item
    /// cannot be added to the catalog.
    pub fn load_catalog(&self, name: &str) -> Result<StockCatalog, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        let catalog = parse_catalog(&contents)?;

        debug!(path = %file_path.display(), items = catalog.len(), "loaded catalog fixture");

        Ok(catalog)
    }

    /// Load a list of scans from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a weight
    /// is malformed.
    pub fn load_scans(&self, name: &str) -> Result<Vec<(String, Quantity)>, FixtureError> {
        let file_path = self.base_path.join("scans").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ScansFixture = serde_norway::from_str(&contents)?;

        fixture
            .scans
            .into_iter()
            .map(ScanFixture::try_into_scan)
            .collect()
    }

    /// Scan a fixture's scan list onto a new receipt against `catalog`
    ///
    /// # Errors
    ///
    /// Returns an error if the scans cannot be loaded or any scan is rejected.
    pub fn receipt<'c>(
        &self,
        catalog: &'c StockCatalog,
        name: &str,
    ) -> Result<Receipt<'c>, FixtureError> {
        let mut receipt = Receipt::new(catalog);

        for (identifier, quantity) in self.load_scans(name)? {
            receipt.add_scan(&identifier, quantity)?;
        }

        Ok(receipt)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a catalog from YAML
///
/// # Errors
///
/// Returns an error if the YAML is malformed or an item cannot be added to
/// the catalog.
pub fn parse_catalog(contents: &str) -> Result<StockCatalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    StockCatalog::try_from(fixture)
}
