//! Pharmacist stock management.
//!
//! Stock status is not stored: it is derived from the on-hand quantity and the
//! reorder level, so the `stock` filter (`in`/`low`/`out`) always agrees with
//! the numbers shown. Expiry checks take `today` explicitly.

use chrono::NaiveDate;
use medidesk_core::{Catalog, CatalogItem, InventoryItemId, SortKey, Sortable, StockStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

/// Items expiring within this many days are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 90;

/// A stocked medicine in the pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub generic_name: String,
    pub brand: String,
    pub category: String,
    /// Dosage form, e.g. `"Tablet"`.
    pub form: String,
    pub strength: String,
    pub quantity: u32,
    /// Reorder level.
    pub min_stock: u32,
    pub max_stock: u32,
    /// Selling price per unit.
    pub price: Decimal,
    pub cost_price: Decimal,
    pub expiry_date: NaiveDate,
    pub batch_number: String,
    /// Shelf location.
    pub location: String,
}

impl InventoryItem {
    #[must_use]
    pub const fn status(&self) -> StockStatus {
        StockStatus::from_levels(self.quantity, self.min_stock)
    }

    /// Days from `today` until expiry; negative once expired.
    #[must_use]
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// Expires within the warning window but not today or earlier.
    #[must_use]
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        (1..=EXPIRY_WARNING_DAYS).contains(&self.days_until_expiry(today))
    }

    /// Expiry date reached.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date <= today
    }

    /// Value of the stock on hand at cost.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.cost_price * Decimal::from(self.quantity)
    }
}

impl CatalogItem for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &InventoryItemId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.generic_name.as_str(),
            self.brand.as_str(),
        ]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "stock" => Some(self.status().bucket()),
            _ => None,
        }
    }

    fn price(&self) -> Option<Decimal> {
        Some(self.price)
    }
}

impl Sortable for InventoryItem {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |i: &Self| Some(i.name.as_str())),
            SortKey::numeric("quantity", |i: &Self| Some(Decimal::from(i.quantity))),
            SortKey::date("expiry", |i: &Self| Some(i.expiry_date)).reversed(),
        ]
    }
}

impl Listing for InventoryItem {
    const KIND: CatalogKind = CatalogKind::Inventory;
    const DIMENSIONS: &'static [&'static str] = &["category", "stock"];

    fn summary(&self) -> String {
        format!(
            "#{} {} ({} {}) {} units [{}], expires {}, shelf {}",
            self.id,
            self.name,
            self.brand,
            self.strength,
            self.quantity,
            self.status(),
            self.expiry_date,
            self.location
        )
    }
}

/// Item counts per stock status, as shown on the inventory summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of quantity times cost price.
    pub stock_value: Decimal,
}

/// Count items per stock status.
#[must_use]
pub fn stock_summary(catalog: &Catalog<InventoryItem>) -> StockSummary {
    catalog.iter().fold(StockSummary::default(), |mut summary, item| {
        summary.total += 1;
        match item.status() {
            StockStatus::InStock => summary.in_stock += 1,
            StockStatus::LowStock => summary.low_stock += 1,
            StockStatus::OutOfStock => summary.out_of_stock += 1,
        }
        summary.stock_value += item.stock_value();
        summary
    })
}

/// Items expiring within the warning window, soonest first.
#[must_use]
pub fn expiring_soon(catalog: &Catalog<InventoryItem>, today: NaiveDate) -> Vec<&InventoryItem> {
    let mut items: Vec<&InventoryItem> =
        catalog.iter().filter(|item| item.is_expiring_soon(today)).collect();
    items.sort_by_key(|item| item.expiry_date);
    items
}

/// Items past their expiry date, oldest first.
#[must_use]
pub fn expired(catalog: &Catalog<InventoryItem>, today: NaiveDate) -> Vec<&InventoryItem> {
    let mut items: Vec<&InventoryItem> =
        catalog.iter().filter(|item| item.is_expired(today)).collect();
    items.sort_by_key(|item| item.expiry_date);
    items
}
