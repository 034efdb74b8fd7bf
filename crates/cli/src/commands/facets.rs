//! Record counts per value of a filter dimension.

use std::collections::BTreeMap;
use std::io::Write;

use medidesk_portal::{CatalogKind, Listing, fixtures};

use super::{CommandError, check_dimension};

/// Print how many records of `kind` carry each value of `dimension`.
///
/// # Errors
///
/// Returns an error if the page has no such dimension or output cannot be
/// written.
pub fn run(kind: CatalogKind, dimension: &str) -> Result<(), CommandError> {
    let counts = with_listing!(kind, counts(dimension))?;
    let total: usize = counts.values().sum();

    let width = counts.keys().map(String::len).max().unwrap_or(0).max(3);
    let mut out = std::io::stdout().lock();
    for (value, count) in &counts {
        writeln!(out, "{value:<width$}  {count}")?;
    }
    writeln!(out, "{:<width$}  {total}", "all")?;
    Ok(())
}

/// Counts for one record type; records without the dimension are skipped.
fn counts<T: Listing>(dimension: &str) -> Result<BTreeMap<String, usize>, CommandError> {
    check_dimension::<T>(dimension)?;
    Ok(fixtures::load::<T>()?.facet_counts(dimension))
}
