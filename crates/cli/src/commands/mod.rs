//! CLI command implementations.

use clap::ValueEnum;
use medidesk_core::SortKeyError;
use medidesk_portal::checkout::CheckoutError;
use medidesk_portal::{CatalogKind, ConfigError, FixtureError};
use serde::Serialize;
use thiserror::Error;

/// Expand to a call of `$func::<Record>(args)` for the record type of `$kind`.
macro_rules! with_listing {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {{
        use medidesk_portal::CatalogKind;
        use medidesk_portal::pages::{
            Appointment, Doctor, Hospital, InventoryItem, LabOrder, LabTest, Medicine, Patient,
            Prescription,
        };
        match $kind {
            CatalogKind::Hospitals => $func::<Hospital>($($arg),*),
            CatalogKind::Doctors => $func::<Doctor>($($arg),*),
            CatalogKind::Patients => $func::<Patient>($($arg),*),
            CatalogKind::LabOrders => $func::<LabOrder>($($arg),*),
            CatalogKind::LabTests => $func::<LabTest>($($arg),*),
            CatalogKind::Medicines => $func::<Medicine>($($arg),*),
            CatalogKind::Inventory => $func::<InventoryItem>($($arg),*),
            CatalogKind::Appointments => $func::<Appointment>($($arg),*),
            CatalogKind::Prescriptions => $func::<Prescription>($($arg),*),
        }
    }};
}

pub mod checkout;
pub mod facets;
pub mod inventory;
pub mod list;

/// Errors surfaced by the commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{catalog} has no '{dimension}' filter (available: {available})")]
    UnknownDimension {
        catalog: CatalogKind,
        dimension: String,
        available: String,
    },

    #[error(transparent)]
    SortKey(#[from] SortKeyError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Order failed: {0}")]
    OrderFailed(String),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How records are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per record
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` for the structured formats; `None` for text.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn structured<S: Serialize + ?Sized>(
        self,
        value: &S,
    ) -> Result<Option<String>, CommandError> {
        Ok(match self {
            Self::Text => None,
            Self::Json => Some(serde_json::to_string_pretty(value)?),
            Self::Yaml => Some(serde_yaml::to_string(value)?),
        })
    }
}

/// Parse a `name=value` filter argument.
///
/// # Errors
///
/// Returns a message clap shows if the argument has no `=` or an empty name.
pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing filter name in '{arg}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Fail unless `T`'s page offers `dimension` as a filter.
///
/// # Errors
///
/// Returns [`CommandError::UnknownDimension`] listing the offered filters.
pub fn check_dimension<T: medidesk_portal::Listing>(dimension: &str) -> Result<(), CommandError> {
    if T::DIMENSIONS.contains(&dimension) {
        Ok(())
    } else {
        Err(CommandError::UnknownDimension {
            catalog: T::KIND,
            dimension: dimension.to_string(),
            available: T::DIMENSIONS.join(", "),
        })
    }
}
