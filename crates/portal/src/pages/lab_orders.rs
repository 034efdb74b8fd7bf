//! Lab technician work queue.

use chrono::NaiveDate;
use medidesk_core::{
    CatalogItem, LabOrderId, LabOrderStatus, PatientId, Priority, SortKey, Sortable,
};
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

/// A test requested by a doctor, waiting to be processed by the lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabOrder {
    pub id: LabOrderId,
    pub patient_name: String,
    pub patient_id: PatientId,
    pub test_type: String,
    pub priority: Priority,
    /// Date the order was requested.
    pub assigned_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LabOrderStatus,
    pub ordered_by: String,
    pub sample_type: String,
    #[serde(default)]
    pub instructions: String,
}

impl LabOrder {
    /// Whether the order is still open after its due date.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status != LabOrderStatus::Completed && self.due_date < today
    }
}

impl CatalogItem for LabOrder {
    type Id = LabOrderId;

    fn id(&self) -> &LabOrderId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.patient_name.as_str(),
            self.test_type.as_str(),
            self.id.as_str(),
        ]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

impl Sortable for LabOrder {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::date("requested", |o: &Self| Some(o.assigned_date)),
            SortKey::date("due", |o: &Self| Some(o.due_date)).reversed(),
            SortKey::text("patient", |o: &Self| Some(o.patient_name.as_str())),
        ]
    }
}

impl Listing for LabOrder {
    const KIND: CatalogKind = CatalogKind::LabOrders;
    const DIMENSIONS: &'static [&'static str] = &["status", "priority"];

    fn summary(&self) -> String {
        format!(
            "{} {} for {} [{}, {}] due {}",
            self.id, self.test_type, self.patient_name, self.priority, self.status, self.due_date
        )
    }
}
