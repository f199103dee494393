//! Checkout Example
//!
//! Scans items against a catalog fixture and prints the receipt total.
//!
//! Use `-f` to load a catalog fixture by name
//! Use `-i ID`, `-i ID=N` or `-i ID=W.W` to scan items; without any, the
//! scan fixture named by `--scans` is used instead

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkout::{
    fixtures::Fixture,
    receipt::Receipt,
    utils::{DemoArgs, parse_scan},
};

/// Checkout Example
pub fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = DemoArgs::parse();

    let fixture = Fixture::new();
    let catalog = fixture.load_catalog(&args.fixture)?;

    let receipt = if args.items.is_empty() {
        fixture.receipt(&catalog, &args.scans)?
    } else {
        let mut receipt = Receipt::new(&catalog);

        for arg in &args.items {
            let (identifier, quantity) = parse_scan(arg)?;
            receipt.add_scan(&identifier, quantity)?;
        }

        receipt
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "{}", receipt.total()?)?;

    Ok(())
}
