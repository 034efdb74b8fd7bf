//! Cart-to-order flow for the pharmacy and lab-test pages.
//!
//! A cart of [`Orderable`] records is priced into an [`OrderDraft`], handed
//! to an [`OrderGateway`], and the outcome is reported back as a [`Notice`].
//!
//! # Example
//!
//! ```rust,ignore
//! let draft = OrderDraft::build(&cart, &medicines, Some(Fulfilment::Delivery), &config.pricing)?;
//! let notice = place_order(&gateway, &draft).await;
//! ```

mod api;
mod gateway;
mod notice;
mod simulated;

pub use api::{ApiGateway, LabOrderRead, PharmacyOrderRead};
pub use gateway::{Gateway, GatewayError, OrderConfirmation, OrderGateway};
pub use notice::{Notice, NoticeLevel};
pub use simulated::SimulatedGateway;

use std::fmt;
use std::str::FromStr;

use medidesk_core::{Cart, Catalog, DEFAULT_TAX_RATE, Fee, OrderTotals, compute_totals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::pages::Listing;

/// Tax and delivery charges applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Fraction of the subtotal, e.g. `0.08`.
    pub tax_rate: Decimal,
    /// Charged for home delivery only.
    pub delivery_fee: Decimal,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            delivery_fee: Decimal::new(500, 2),
        }
    }
}

/// Which checkout flow an order goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutKind {
    Pharmacy,
    LabTests,
}

impl CheckoutKind {
    /// Prefix of order references, e.g. `PH-3f2a9c1b`.
    #[must_use]
    pub const fn reference_prefix(self) -> &'static str {
        match self {
            Self::Pharmacy => "PH",
            Self::LabTests => "LT",
        }
    }

    /// Whether the flow offers a fulfilment choice.
    #[must_use]
    pub const fn has_fulfilment(self) -> bool {
        matches!(self, Self::Pharmacy)
    }
}

impl fmt::Display for CheckoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pharmacy => "pharmacy",
            Self::LabTests => "lab tests",
        })
    }
}

/// How a pharmacy order reaches the patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fulfilment {
    #[default]
    Delivery,
    Pickup,
}

impl Fulfilment {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivery => "Home Delivery",
            Self::Pickup => "Pharmacy Pickup",
        }
    }

    /// Estimated time shown on the confirmation.
    #[must_use]
    pub const fn estimated_time(self) -> &'static str {
        match self {
            Self::Delivery => "2-4 hours",
            Self::Pickup => "Ready in 30 minutes",
        }
    }

    /// The delivery fee line for this fulfilment.
    #[must_use]
    pub fn fee(self, pricing: &Pricing) -> Fee {
        Fee::new("Delivery", pricing.delivery_fee, self == Self::Delivery)
    }
}

impl FromStr for Fulfilment {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(Self::Delivery),
            "pickup" => Ok(Self::Pickup),
            other => Err(CheckoutError::InvalidFulfilment(other.to_string())),
        }
    }
}

/// Whether a record can be put in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    OutOfStock,
    /// Ordering needs an uploaded prescription, which the cart cannot carry.
    PrescriptionRequired,
}

impl Availability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OutOfStock => "out of stock",
            Self::PrescriptionRequired => "prescription required",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing record that can be ordered through a checkout flow.
pub trait Orderable: Listing {
    /// The flow orders of this record go through.
    const CHECKOUT: CheckoutKind;

    /// Display name on order lines.
    fn name(&self) -> &str;

    /// Integer id the backend knows the record by.
    fn backend_id(&self) -> i32;

    fn availability(&self) -> Availability {
        Availability::Available
    }
}

/// Errors raised while building or placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No such item: {0}")]
    UnknownItem(String),

    #[error("{name} cannot be ordered: {availability}")]
    Unavailable {
        name: String,
        availability: Availability,
    },

    #[error("Invalid fulfilment '{0}' (expected delivery or pickup)")]
    InvalidFulfilment(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Add one of `id` to the cart, refusing records that cannot be ordered.
///
/// # Errors
///
/// Returns [`CheckoutError::UnknownItem`] if `id` is not in the catalog and
/// [`CheckoutError::Unavailable`] if the record is out of stock or needs a
/// prescription.
pub fn add_to_cart<T: Orderable>(
    cart: Cart<T::Id>,
    catalog: &Catalog<T>,
    id: T::Id,
) -> Result<Cart<T::Id>, CheckoutError> {
    let item = catalog
        .find(&id)
        .ok_or_else(|| CheckoutError::UnknownItem(format!("{id:?}")))?;
    match item.availability() {
        Availability::Available => Ok(cart.add(id)),
        availability => Err(CheckoutError::Unavailable {
            name: item.name().to_string(),
            availability,
        }),
    }
}

/// One priced order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    /// Backend id of the medicine or lab test.
    pub item_id: i32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A priced order, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub kind: CheckoutKind,
    /// `None` for flows without a fulfilment choice.
    pub fulfilment: Option<Fulfilment>,
    pub lines: Vec<DraftLine>,
    pub totals: OrderTotals,
}

impl OrderDraft {
    /// Price `cart` against `catalog`.
    ///
    /// The fulfilment is ignored for flows that do not offer one, so lab-test
    /// orders never carry a delivery fee. Pharmacy orders default to delivery.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no entry that
    /// resolves in the catalog, and [`CheckoutError::Unavailable`] if any
    /// resolved record cannot be ordered.
    pub fn build<T: Orderable>(
        cart: &Cart<T::Id>,
        catalog: &Catalog<T>,
        fulfilment: Option<Fulfilment>,
        pricing: &Pricing,
    ) -> Result<Self, CheckoutError> {
        let kind = T::CHECKOUT;
        let fulfilment = kind
            .has_fulfilment()
            .then(|| fulfilment.unwrap_or_default());

        let mut lines = Vec::with_capacity(cart.len());
        for line in cart.lines(catalog) {
            let Some(item) = catalog.find(&line.id) else {
                continue;
            };
            let availability = item.availability();
            if availability != Availability::Available {
                warn!(name = item.name(), %availability, "Refusing unavailable item");
                return Err(CheckoutError::Unavailable {
                    name: item.name().to_string(),
                    availability,
                });
            }
            lines.push(DraftLine {
                item_id: item.backend_id(),
                name: item.name().to_string(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            });
        }
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let fees: Vec<Fee> = fulfilment.map(|f| f.fee(pricing)).into_iter().collect();
        let totals = compute_totals(cart, catalog, pricing.tax_rate, &fees);

        Ok(Self {
            kind,
            fulfilment,
            lines,
            totals,
        })
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Submit `draft` and turn the outcome into a notice for the user.
#[instrument(skip_all, fields(kind = %draft.kind, total = %draft.totals.total))]
pub async fn place_order<G: OrderGateway>(gateway: &G, draft: &OrderDraft) -> Notice {
    match gateway.submit(draft).await {
        Ok(confirmation) => {
            info!(reference = %confirmation.reference, "Order placed");
            Notice::order_placed(draft, &confirmation)
        }
        Err(e) => {
            warn!(error = %e, "Order failed");
            Notice::order_failed(&CheckoutError::Gateway(e))
        }
    }
}
