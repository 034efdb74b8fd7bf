//! Hospital admin doctor roster.

use chrono::NaiveDate;
use medidesk_core::{CatalogItem, DoctorId, DoctorStatus, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

/// A doctor on the hospital's staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub department: String,
    pub experience_years: u32,
    pub status: DoctorStatus,
    pub join_date: NaiveDate,
    /// Patients currently assigned.
    pub patients: u32,
    pub consultation_fee: Decimal,
}

impl CatalogItem for Doctor {
    type Id = DoctorId;

    fn id(&self) -> &DoctorId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.specialization.as_str(),
            self.department.as_str(),
        ]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "department" => Some(self.department.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Sortable for Doctor {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |d: &Self| Some(d.name.as_str())),
            SortKey::numeric("experience", |d: &Self| Some(Decimal::from(d.experience_years))),
            SortKey::numeric("fee", |d: &Self| Some(d.consultation_fee)),
            SortKey::date("joined", |d: &Self| Some(d.join_date)),
        ]
    }
}

impl Listing for Doctor {
    const KIND: CatalogKind = CatalogKind::Doctors;
    const DIMENSIONS: &'static [&'static str] = &["department", "status"];

    fn summary(&self) -> String {
        format!(
            "{} {} - {}, {} years ({})",
            self.id, self.name, self.department, self.experience_years, self.status
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medidesk_core::FilterCriteria;

    use super::*;
    use crate::fixtures;

    #[test]
    fn test_search_matches_specialization() {
        let catalog = fixtures::load::<Doctor>().unwrap();
        let view = catalog.filter(&FilterCriteria::new().search("neuro"));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "DOC003");
    }

    #[test]
    fn test_department_and_status_are_anded() {
        let catalog = fixtures::load::<Doctor>().unwrap();
        let criteria = FilterCriteria::new()
            .with("department", "Pediatrics")
            .with("status", "Active");
        assert!(catalog.filter(&criteria).is_empty());

        let criteria = criteria.with("status", "On Leave");
        assert_eq!(catalog.filter(&criteria).len(), 1);
    }

    #[test]
    fn test_sort_by_experience_descending() {
        let catalog = fixtures::load::<Doctor>().unwrap();
        let key = Doctor::sort_key("-experience").unwrap();
        let view = catalog.filter_sorted(&FilterCriteria::new(), Some(&key));
        let years: Vec<u32> = view.iter().map(|d| d.experience_years).collect();
        assert_eq!(years, vec![18, 15, 12, 10]);
    }
}
