//! Patient list, as seen by doctors and hospital admins.

use chrono::NaiveDate;
use medidesk_core::{CatalogItem, PatientId, PatientStatus, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub last_visit: NaiveDate,
    #[serde(default)]
    pub next_appointment: Option<NaiveDate>,
    pub condition: String,
    pub status: PatientStatus,
    pub blood_type: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub department: String,
}

impl CatalogItem for Patient {
    type Id = PatientId;

    fn id(&self) -> &PatientId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.condition.as_str(), self.id.as_str()]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "condition" => Some(self.condition.as_str()),
            "status" => Some(self.status.as_str()),
            "department" => Some(self.department.as_str()),
            _ => None,
        }
    }
}

impl Sortable for Patient {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |p: &Self| Some(p.name.as_str())),
            SortKey::numeric("age", |p: &Self| Some(Decimal::from(p.age))),
            SortKey::date("lastVisit", |p: &Self| Some(p.last_visit)),
            SortKey::date("nextAppointment", |p: &Self| p.next_appointment).reversed(),
        ]
    }
}

impl Listing for Patient {
    const KIND: CatalogKind = CatalogKind::Patients;
    const DIMENSIONS: &'static [&'static str] = &["condition", "status", "department"];

    fn summary(&self) -> String {
        format!(
            "{} {}, {} - {} ({}), last visit {}",
            self.id, self.name, self.age, self.condition, self.status, self.last_visit
        )
    }
}
