//! Listing page records.
//!
//! Each page of the portal shows one record type. The record decides which
//! of its fields the search box looks at, which categorical dimensions the
//! filter dropdowns offer, and which sort keys are available.

mod appointments;
mod doctors;
mod hospitals;
mod inventory;
mod lab_orders;
mod lab_tests;
mod medicines;
mod patients;
mod prescriptions;

pub use appointments::Appointment;
pub use doctors::Doctor;
pub use hospitals::Hospital;
pub use inventory::{InventoryItem, StockSummary, expired, expiring_soon, stock_summary};
pub use lab_orders::LabOrder;
pub use lab_tests::LabTest;
pub use medicines::Medicine;
pub use patients::Patient;
pub use prescriptions::{Prescription, PrescribedMedication};

use std::fmt;
use std::str::FromStr;

use medidesk_core::{CatalogItem, Sortable};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A record shown on one listing page.
pub trait Listing: CatalogItem + Sortable + Serialize + DeserializeOwned {
    /// The page this record belongs to.
    const KIND: CatalogKind;

    /// Dimension names the page offers as filters.
    const DIMENSIONS: &'static [&'static str];

    /// One-line rendering of the record for plain-text output.
    fn summary(&self) -> String;
}

/// The listing pages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogKind {
    Hospitals,
    Doctors,
    Patients,
    LabOrders,
    LabTests,
    Medicines,
    Inventory,
    Appointments,
    Prescriptions,
}

impl CatalogKind {
    /// Every page, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Hospitals,
        Self::Doctors,
        Self::Patients,
        Self::LabOrders,
        Self::LabTests,
        Self::Medicines,
        Self::Inventory,
        Self::Appointments,
        Self::Prescriptions,
    ];

    /// Name used on the command line and in fixture file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hospitals => "hospitals",
            Self::Doctors => "doctors",
            Self::Patients => "patients",
            Self::LabOrders => "lab-orders",
            Self::LabTests => "lab-tests",
            Self::Medicines => "medicines",
            Self::Inventory => "inventory",
            Self::Appointments => "appointments",
            Self::Prescriptions => "prescriptions",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown page name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog '{0}'")]
pub struct UnknownCatalogError(pub String);

impl FromStr for CatalogKind {
    type Err = UnknownCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownCatalogError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_kind_round_trips_names() {
        for kind in CatalogKind::ALL {
            assert_eq!(kind.as_str().parse::<CatalogKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_catalog_kind_accepts_underscores_and_case() {
        assert_eq!("Lab_Tests".parse::<CatalogKind>().unwrap(), CatalogKind::LabTests);
    }

    #[test]
    fn test_unknown_catalog() {
        let err = "billing".parse::<CatalogKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown catalog 'billing'");
    }
}
