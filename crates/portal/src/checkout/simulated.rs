//! Offline gateway that accepts every order after a fixed delay.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::OrderDraft;
use super::gateway::{GatewayError, OrderConfirmation, OrderGateway};

/// Confirms orders locally, standing in for the backend.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl OrderGateway for SimulatedGateway {
    #[instrument(skip_all, fields(kind = %draft.kind))]
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderConfirmation, GatewayError> {
        tokio::time::sleep(self.delay).await;

        let id = Uuid::new_v4().simple().to_string();
        let short = id.get(..8).unwrap_or(&id).to_uppercase();
        let reference = format!("{}-{short}", draft.kind.reference_prefix());
        debug!(%reference, lines = draft.lines.len(), "Simulated order accepted");

        Ok(OrderConfirmation {
            reference,
            estimated_time: draft.fulfilment.map(|f| f.estimated_time().to_string()),
            backend_ids: Vec::new(),
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medidesk_core::{Cart, LabTestId, MedicineId};

    use super::*;
    use crate::checkout::{Fulfilment, Pricing};
    use crate::fixtures;
    use crate::pages::{LabTest, Medicine};

    fn pharmacy_draft(fulfilment: Fulfilment) -> OrderDraft {
        let medicines = fixtures::load::<Medicine>().unwrap();
        let cart = Cart::new().add(MedicineId::new(1));
        OrderDraft::build(&cart, &medicines, Some(fulfilment), &Pricing::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_the_configured_delay() {
        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        let confirmation = gateway.submit(&pharmacy_draft(Fulfilment::Delivery)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(confirmation.reference.starts_with("PH-"));
        assert_eq!(confirmation.reference.len(), 11);
        assert_eq!(confirmation.estimated_time.as_deref(), Some("2-4 hours"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pickup_eta() {
        let gateway = SimulatedGateway::new(Duration::from_millis(10));
        let confirmation = gateway.submit(&pharmacy_draft(Fulfilment::Pickup)).await.unwrap();
        assert_eq!(confirmation.estimated_time.as_deref(), Some("Ready in 30 minutes"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lab_order_reference() {
        let tests = fixtures::load::<LabTest>().unwrap();
        let cart = Cart::new().add(LabTestId::new(3));
        let draft = OrderDraft::build(&cart, &tests, None, &Pricing::default()).unwrap();
        let confirmation = SimulatedGateway::new(Duration::ZERO).submit(&draft).await.unwrap();
        assert!(confirmation.reference.starts_with("LT-"));
        assert_eq!(confirmation.estimated_time, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_references_are_unique() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        let draft = pharmacy_draft(Fulfilment::Delivery);
        let first = gateway.submit(&draft).await.unwrap();
        let second = gateway.submit(&draft).await.unwrap();
        assert_ne!(first.reference, second.reference);
    }
}
