//! Utils

use clap::Parser;

use crate::{
    fixtures::{FixtureError, catalog::parse_amount},
    quantity::Quantity,
};

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Catalog fixture to scan against
    #[clap(short, long, default_value = "kata")]
    pub fixture: String,

    /// Scan fixture to use when no scans are given
    #[clap(long, default_value = "kata")]
    pub scans: String,

    /// Items to scan, as `ID` for one unit, `ID=N` for a count or `ID=W.W` for a weight
    #[clap(short = 'i', long = "item")]
    pub items: Vec<String>,
}

/// Parse a command-line scan: `ID`, `ID=3` or `ID=1.25`.
///
/// A quantity with a decimal point is a weight; anything else is a count.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the quantity is not a number.
pub fn parse_scan(arg: &str) -> Result<(String, Quantity), FixtureError> {
    let Some((identifier, quantity)) = arg.rsplit_once('=') else {
        return Ok((arg.to_string(), Quantity::ONE));
    };

    let quantity = quantity.trim();

    let quantity = if quantity.contains('.') {
        Quantity::Weight(parse_amount(quantity)?)
    } else {
        Quantity::Count(
            quantity
                .parse()
                .map_err(|_err| FixtureError::InvalidPrice(quantity.to_string()))?,
        )
    };

    Ok((identifier.to_string(), quantity))
}
