//! Doctor appointment requests.

use chrono::NaiveDate;
use medidesk_core::{AppointmentId, AppointmentStatus, CatalogItem, PatientId, SortKey, Sortable};
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    /// Patient display name.
    pub patient: String,
    pub patient_id: PatientId,
    pub date: NaiveDate,
    /// Slot as displayed, e.g. `"10:00 AM"`.
    pub time: String,
    /// Visit type: consultation, follow-up, emergency.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AppointmentStatus,
    pub phone: String,
    pub reason: String,
    pub duration: String,
    #[serde(default)]
    pub notes: String,
}

impl CatalogItem for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> &AppointmentId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient.as_str(), self.reason.as_str()]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "type" => Some(self.kind.as_str()),
            _ => None,
        }
    }
}

impl Sortable for Appointment {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::date("date", |a: &Self| Some(a.date)),
            SortKey::text("patient", |a: &Self| Some(a.patient.as_str())),
        ]
    }
}

impl Listing for Appointment {
    const KIND: CatalogKind = CatalogKind::Appointments;
    const DIMENSIONS: &'static [&'static str] = &["status", "type"];

    fn summary(&self) -> String {
        format!(
            "#{} {} {} {} - {} ({}, {})",
            self.id, self.date, self.time, self.patient, self.reason, self.kind, self.status
        )
    }
}
