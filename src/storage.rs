use std::path::Path;

use tracing::{info, span, Level};

use crate::{
    error::{Error, Result},
    ledger::Ledger,
    parsing, print,
};

/// Reads and parses a whole ledger file.
pub fn load(path: &Path, capacity: usize) -> Result<Ledger> {
    let _span = span!(Level::INFO, "load", path = %path.display()).entered();

    let text = std::fs::read_to_string(path).map_err(|e| Error::storage(path, e))?;
    let ledger = parsing::parse_with_capacity(&text, capacity)?;

    info!(categories = ledger.count(), "loaded");

    Ok(ledger)
}

/// Writes the formatted table, replacing anything already at `path`.
pub fn save(path: &Path, ledger: &Ledger) -> Result<()> {
    let _span = span!(Level::INFO, "save", path = %path.display()).entered();

    std::fs::write(path, print::format(ledger)).map_err(|e| Error::storage(path, e))?;

    info!(categories = ledger.count(), "saved");

    Ok(())
}
