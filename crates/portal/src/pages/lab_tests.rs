//! Patient lab test catalog.

use medidesk_core::{CatalogItem, LabTestId, Price, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};
use crate::checkout::{CheckoutKind, Orderable};

/// A diagnostic test patients can book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub id: LabTestId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    /// Fasting or other preparation needed before the sample is taken.
    #[serde(default)]
    pub preparation_required: bool,
    /// Turnaround, e.g. `"24 hours"`.
    pub report_time: String,
}

impl CatalogItem for LabTest {
    type Id = LabTestId;

    fn id(&self) -> &LabTestId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.description.as_str(),
        ]
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

impl Sortable for LabTest {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |t: &Self| Some(t.name.as_str())),
            SortKey::numeric("price", |t: &Self| Some(t.price)),
        ]
    }
}

impl Listing for LabTest {
    const KIND: CatalogKind = CatalogKind::LabTests;
    const DIMENSIONS: &'static [&'static str] = &["category"];

    fn summary(&self) -> String {
        let preparation = if self.preparation_required {
            ", preparation required"
        } else {
            ""
        };
        format!(
            "#{} {} ({}) {}, results in {}{preparation}",
            self.id,
            self.name,
            self.category,
            Price::new(self.price),
            self.report_time
        )
    }
}

impl Orderable for LabTest {
    const CHECKOUT: CheckoutKind = CheckoutKind::LabTests;

    fn name(&self) -> &str {
        &self.name
    }

    fn backend_id(&self) -> i32 {
        self.id.as_i32()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medidesk_core::FilterCriteria;

    use super::*;
    use crate::fixtures;

    #[test]
    fn test_search_matches_description() {
        let catalog = fixtures::load::<LabTest>().unwrap();
        let view = catalog.filter(&FilterCriteria::new().search("cholesterol"));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Lipid Profile");
    }

    #[test]
    fn test_blood_tests_by_price() {
        let catalog = fixtures::load::<LabTest>().unwrap();
        let key = LabTest::sort_key("price").unwrap();
        let blood = FilterCriteria::new().with("category", "Blood Tests");
        let view = catalog.filter_sorted(&blood, Some(&key));
        let names: Vec<&str> = view.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Lipid Profile", "Complete Blood Count (CBC)"]);
    }

    #[test]
    fn test_summary() {
        let catalog = fixtures::load::<LabTest>().unwrap();
        let lipid = catalog.find(&LabTestId::new(2)).unwrap();
        assert_eq!(
            lipid.summary(),
            "#2 Lipid Profile (Blood Tests) $35.00, results in 24 hours, preparation required"
        );
    }
}
