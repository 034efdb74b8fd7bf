//! Prescriptions written by a doctor.

use chrono::NaiveDate;
use medidesk_core::{CatalogItem, PatientId, PrescriptionId, PrescriptionStatus, SortKey, Sortable};
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

/// One medication line on a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescribedMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_name: String,
    pub patient_id: PatientId,
    pub date: NaiveDate,
    pub status: PrescriptionStatus,
    pub medications: Vec<PrescribedMedication>,
    pub diagnosis: String,
    #[serde(default)]
    pub notes: String,
}

impl CatalogItem for Prescription {
    type Id = PrescriptionId;

    fn id(&self) -> &PrescriptionId {
        &self.id
    }

    /// Patient name, every medication name, and the prescription id.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(self.medications.len() + 2);
        fields.push(self.patient_name.as_str());
        fields.extend(self.medications.iter().map(|m| m.name.as_str()));
        fields.push(self.id.as_str());
        fields
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Sortable for Prescription {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::date("date", |p: &Self| Some(p.date)),
            SortKey::text("patient", |p: &Self| Some(p.patient_name.as_str())),
        ]
    }
}

impl Listing for Prescription {
    const KIND: CatalogKind = CatalogKind::Prescriptions;
    const DIMENSIONS: &'static [&'static str] = &["status"];

    fn summary(&self) -> String {
        let medications: Vec<String> = self
            .medications
            .iter()
            .map(|m| format!("{} {}", m.name, m.dosage))
            .collect();
        format!(
            "{} {} {} ({}) - {}: {}",
            self.id,
            self.date,
            self.patient_name,
            self.status,
            self.diagnosis,
            medications.join(", ")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medidesk_core::FilterCriteria;

    use super::*;
    use crate::fixtures;

    fn ids(view: &[&Prescription]) -> Vec<String> {
        view.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_search_matches_any_medication() {
        let catalog = fixtures::load::<Prescription>().unwrap();
        assert_eq!(ids(&catalog.filter(&FilterCriteria::new().search("metformin"))), vec!["RX001"]);
        assert_eq!(ids(&catalog.filter(&FilterCriteria::new().search("inhaler"))), vec!["RX003"]);
    }

    #[test]
    fn test_search_matches_id() {
        let catalog = fixtures::load::<Prescription>().unwrap();
        assert_eq!(ids(&catalog.filter(&FilterCriteria::new().search("rx002"))), vec!["RX002"]);
    }

    #[test]
    fn test_active_most_recent_first() {
        let catalog = fixtures::load::<Prescription>().unwrap();
        let key = Prescription::default_sort().unwrap();
        let active = FilterCriteria::new().with("status", "Active");
        let view = catalog.filter_sorted(&active, Some(&key));
        assert_eq!(ids(&view), vec!["RX001", "RX003"]);
    }

    #[test]
    fn test_summary_lists_medications() {
        let catalog = fixtures::load::<Prescription>().unwrap();
        let rx = catalog.find(&PrescriptionId::new("RX002")).unwrap();
        assert_eq!(
            rx.summary(),
            "RX002 2024-01-12 Sarah Wilson (Completed) - Bacterial Infection: Amoxicillin 500mg"
        );
    }
}
