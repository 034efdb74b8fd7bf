//! Patient pharmacy storefront.

use medidesk_core::{CatalogItem, MedicineId, Price, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};
use crate::checkout::{Availability, CheckoutKind, Orderable};

/// A medicine patients can order from the pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub in_stock: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub requires_prescription: bool,
}

impl CatalogItem for Medicine {
    type Id = MedicineId;

    fn id(&self) -> &MedicineId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn price(&self) -> Option<Decimal> {
        Some(self.price)
    }
}

impl Sortable for Medicine {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |m: &Self| Some(m.name.as_str())),
            SortKey::numeric("price", |m: &Self| Some(m.price)),
        ]
    }
}

impl Listing for Medicine {
    const KIND: CatalogKind = CatalogKind::Medicines;
    const DIMENSIONS: &'static [&'static str] = &["category"];

    fn summary(&self) -> String {
        let mut line = format!(
            "#{} {} ({}) {}",
            self.id,
            self.name,
            self.category,
            Price::new(self.price)
        );
        match self.availability() {
            Availability::Available => {}
            other => {
                line.push_str(" - ");
                line.push_str(other.as_str());
            }
        }
        line
    }
}

impl Orderable for Medicine {
    const CHECKOUT: CheckoutKind = CheckoutKind::Pharmacy;

    fn name(&self) -> &str {
        &self.name
    }

    fn backend_id(&self) -> i32 {
        self.id.as_i32()
    }

    fn availability(&self) -> Availability {
        if !self.in_stock {
            Availability::OutOfStock
        } else if self.requires_prescription {
            Availability::PrescriptionRequired
        } else {
            Availability::Available
        }
    }
}
