//! Build a cart, show the order summary, and place the order.

use std::io::Write;

use clap::ValueEnum;
use medidesk_core::{Cart, Catalog, Price};
use medidesk_portal::PortalConfig;
use medidesk_portal::checkout::{
    CheckoutError, Fulfilment, Gateway, OrderDraft, Orderable, Pricing, add_to_cart, place_order,
};
use medidesk_portal::fixtures;
use medidesk_portal::pages::{LabTest, Medicine};
use tracing::{info, warn};

use super::CommandError;

/// Checkout flows offered by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flow {
    /// Medicines, delivered or picked up
    Pharmacy,
    /// Lab tests, scheduled at the lab
    Lab,
}

/// Cart edits and checkout options from the command line.
#[derive(Debug, Clone, Default)]
pub struct Order {
    /// Ids to add, one unit per occurrence.
    pub add: Vec<i32>,
    /// Ids to take one unit off.
    pub remove: Vec<i32>,
    pub pickup: bool,
    pub dry_run: bool,
}

impl Order {
    /// Apply the cart edits against `catalog` and price the result.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] for unknown or unorderable ids and for an
    /// empty cart.
    pub fn draft<T>(
        &self,
        catalog: &Catalog<T>,
        pricing: &Pricing,
    ) -> Result<OrderDraft, CheckoutError>
    where
        T: Orderable,
        T::Id: From<i32>,
    {
        let mut cart = Cart::new();
        for &id in &self.add {
            cart = add_to_cart(cart, catalog, T::Id::from(id))?;
        }
        for &id in &self.remove {
            cart = cart.remove(&T::Id::from(id));
        }

        let fulfilment = if self.pickup {
            Fulfilment::Pickup
        } else {
            Fulfilment::Delivery
        };
        if self.pickup && !T::CHECKOUT.has_fulfilment() {
            warn!(flow = %T::CHECKOUT, "Ignoring --pickup");
        }
        OrderDraft::build(&cart, catalog, Some(fulfilment), pricing)
    }
}

/// Run the checkout for `flow`.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the cart cannot be priced,
/// or the gateway rejects the order.
pub async fn run(flow: Flow, order: &Order) -> Result<(), CommandError> {
    let config = PortalConfig::from_env()?;
    match flow {
        Flow::Pharmacy => checkout::<Medicine>(&config, order).await,
        Flow::Lab => checkout::<LabTest>(&config, order).await,
    }
}

async fn checkout<T>(config: &PortalConfig, order: &Order) -> Result<(), CommandError>
where
    T: Orderable,
    T::Id: From<i32>,
{
    let catalog = fixtures::load::<T>()?;
    let draft = order.draft(&catalog, &config.pricing)?;
    print_summary(&draft)?;

    if order.dry_run {
        info!("Dry run, order not submitted");
        return Ok(());
    }

    let gateway = Gateway::from_config(config).map_err(CheckoutError::from)?;
    let notice = place_order(&gateway, &draft).await;
    writeln!(std::io::stdout(), "{notice}")?;

    if notice.is_success() {
        Ok(())
    } else {
        Err(CommandError::OrderFailed(notice.description))
    }
}

fn print_summary(draft: &OrderDraft) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "Order summary ({}, {} items)", draft.kind, draft.item_count())?;
    for line in &draft.lines {
        writeln!(
            out,
            "  {} x {} @ {} = {}",
            line.quantity,
            line.name,
            Price::new(line.unit_price),
            Price::new(line.line_total)
        )?;
    }
    if let Some(fulfilment) = draft.fulfilment {
        writeln!(
            out,
            "  {} ({})",
            fulfilment.label(),
            fulfilment.estimated_time()
        )?;
    }
    let totals = &draft.totals;
    writeln!(out, "  Subtotal {}", Price::new(totals.subtotal))?;
    writeln!(out, "  Tax      {}", Price::new(totals.tax))?;
    if draft.fulfilment.is_some() {
        writeln!(out, "  Delivery {}", Price::new(totals.fees))?;
    }
    writeln!(out, "  Total    {}", Price::new(totals.total))?;
    Ok(())
}
