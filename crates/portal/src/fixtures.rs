//! Page data embedded at compile time.
//!
//! The portal works offline against these snapshots; a page's records are
//! parsed on demand and wrapped in a [`Catalog`].

use medidesk_core::Catalog;
use thiserror::Error;
use tracing::debug;

use crate::pages::{CatalogKind, Listing};

/// Errors raised while parsing page data.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid {kind} data: {source}")]
    Parse {
        kind: CatalogKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw JSON for one page.
#[must_use]
pub const fn source(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Hospitals => include_str!("../fixtures/hospitals.json"),
        CatalogKind::Doctors => include_str!("../fixtures/doctors.json"),
        CatalogKind::Patients => include_str!("../fixtures/patients.json"),
        CatalogKind::LabOrders => include_str!("../fixtures/lab_orders.json"),
        CatalogKind::LabTests => include_str!("../fixtures/lab_tests.json"),
        CatalogKind::Medicines => include_str!("../fixtures/medicines.json"),
        CatalogKind::Inventory => include_str!("../fixtures/inventory.json"),
        CatalogKind::Appointments => include_str!("../fixtures/appointments.json"),
        CatalogKind::Prescriptions => include_str!("../fixtures/prescriptions.json"),
    }
}

/// Load the embedded records for `T`'s page.
///
/// # Errors
///
/// Returns [`FixtureError::Parse`] if the embedded JSON does not match the
/// record type.
pub fn load<T: Listing>() -> Result<Catalog<T>, FixtureError> {
    parse(T::KIND, source(T::KIND))
}

/// Parse a JSON array of `T` records, e.g. a snapshot saved from the backend.
///
/// # Errors
///
/// Returns [`FixtureError::Parse`] if `json` is not an array of `T`.
pub fn parse<T: Listing>(kind: CatalogKind, json: &str) -> Result<Catalog<T>, FixtureError> {
    let items: Vec<T> =
        serde_json::from_str(json).map_err(|source| FixtureError::Parse { kind, source })?;
    debug!(%kind, count = items.len(), "Loaded catalog");
    Ok(Catalog::new(items))
}
