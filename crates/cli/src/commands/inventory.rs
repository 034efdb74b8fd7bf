//! Stock summary and expiry report for the pharmacist.

use std::io::Write;

use chrono::NaiveDate;
use medidesk_core::Price;
use medidesk_portal::fixtures;
use medidesk_portal::pages::{InventoryItem, StockSummary, expired, expiring_soon, stock_summary};
use serde::Serialize;

use super::{CommandError, OutputFormat};

/// Everything the inventory page shows above the item table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub today: NaiveDate,
    pub summary: StockSummary,
    pub expiring_soon: Vec<&'a InventoryItem>,
    pub expired: Vec<&'a InventoryItem>,
}

/// Print the inventory report as of `today`.
///
/// # Errors
///
/// Returns an error if the inventory cannot be loaded or output cannot be
/// written.
pub fn run(today: NaiveDate, format: OutputFormat) -> Result<(), CommandError> {
    let catalog = fixtures::load::<InventoryItem>()?;
    let report = Report {
        today,
        summary: stock_summary(&catalog),
        expiring_soon: expiring_soon(&catalog, today),
        expired: expired(&catalog, today),
    };

    let mut out = std::io::stdout().lock();
    if let Some(rendered) = format.structured(&report)? {
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    let summary = &report.summary;
    writeln!(out, "Inventory as of {today}")?;
    writeln!(out, "  Total items   {}", summary.total)?;
    writeln!(out, "  In stock      {}", summary.in_stock)?;
    writeln!(out, "  Low stock     {}", summary.low_stock)?;
    writeln!(out, "  Out of stock  {}", summary.out_of_stock)?;
    writeln!(out, "  Stock value   {}", Price::new(summary.stock_value))?;

    if !report.expiring_soon.is_empty() {
        writeln!(out, "Expiring soon")?;
        for item in &report.expiring_soon {
            writeln!(
                out,
                "  {} (batch {}) in {} days",
                item.name,
                item.batch_number,
                item.days_until_expiry(today)
            )?;
        }
    }
    if !report.expired.is_empty() {
        writeln!(out, "Expired")?;
        for item in &report.expired {
            writeln!(
                out,
                "  {} (batch {}) on {}",
                item.name, item.batch_number, item.expiry_date
            )?;
        }
    }
    Ok(())
}
