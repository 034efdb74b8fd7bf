//! System admin hospital directory.

use medidesk_core::{CatalogItem, HospitalId, HospitalStatus, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogKind, Listing};

/// A hospital registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Number of departments.
    pub departments: u32,
    /// Number of doctors on staff.
    pub doctors: u32,
    pub status: HospitalStatus,
    /// Year the hospital was established.
    pub established: i32,
}

impl CatalogItem for Hospital {
    type Id = HospitalId;

    fn id(&self) -> &HospitalId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str()]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Sortable for Hospital {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |h: &Self| Some(h.name.as_str())),
            SortKey::numeric("established", |h: &Self| Some(Decimal::from(h.established))),
        ]
    }
}

impl Listing for Hospital {
    const KIND: CatalogKind = CatalogKind::Hospitals;
    const DIMENSIONS: &'static [&'static str] = &["status"];

    fn summary(&self) -> String {
        format!(
            "#{} {} ({}) - {}, {} departments, {} doctors",
            self.id, self.name, self.status, self.address, self.departments, self.doctors
        )
    }
}
