//! User-facing outcome of a checkout.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::gateway::OrderConfirmation;
use super::{CheckoutError, CheckoutKind, OrderDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message for the presentation layer to show after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
    /// Order reference, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Notice {
    /// Confirmation shown once the gateway accepted `draft`.
    #[must_use]
    pub fn order_placed(draft: &OrderDraft, confirmation: &OrderConfirmation) -> Self {
        let mut description = match draft.kind {
            CheckoutKind::Pharmacy => {
                "Your pharmacy order has been confirmed. You'll receive updates shortly."
            }
            CheckoutKind::LabTests => {
                "Your lab tests have been scheduled. You'll receive confirmation shortly."
            }
        }
        .to_string();
        if let (Some(fulfilment), Some(eta)) = (draft.fulfilment, &confirmation.estimated_time) {
            description.push_str(&format!(" {}: {eta}.", fulfilment.label()));
        }

        Self {
            level: NoticeLevel::Success,
            title: "Order Placed Successfully!".to_string(),
            description,
            reference: Some(confirmation.reference.clone()),
        }
    }

    /// Failure shown when the order could not be placed.
    #[must_use]
    pub fn order_failed(error: &CheckoutError) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Order Failed".to_string(),
            description: error.to_string(),
            reference: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.description)?;
        if let Some(reference) = &self.reference {
            write!(f, " Order #{reference}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use medidesk_core::{Cart, LabTestId, MedicineId};

    use super::*;
    use crate::checkout::{Fulfilment, GatewayError, Pricing};
    use crate::fixtures;
    use crate::pages::{LabTest, Medicine};

    fn confirmation(reference: &str, eta: Option<&str>) -> OrderConfirmation {
        OrderConfirmation {
            reference: reference.to_string(),
            estimated_time: eta.map(str::to_string),
            backend_ids: Vec::new(),
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn test_pharmacy_notice() {
        let medicines = fixtures::load::<Medicine>().unwrap();
        let cart = Cart::new().add(MedicineId::new(1));
        let draft =
            OrderDraft::build(&cart, &medicines, Some(Fulfilment::Delivery), &Pricing::default())
                .unwrap();
        let notice = Notice::order_placed(&draft, &confirmation("PH-2024-001", Some("2-4 hours")));
        assert!(notice.is_success());
        assert_eq!(notice.title, "Order Placed Successfully!");
        assert_eq!(
            notice.description,
            "Your pharmacy order has been confirmed. You'll receive updates shortly. Home Delivery: 2-4 hours."
        );
        assert!(notice.to_string().ends_with("Order #PH-2024-001"));
    }

    #[test]
    fn test_lab_notice() {
        let tests = fixtures::load::<LabTest>().unwrap();
        let cart = Cart::new().add(LabTestId::new(1));
        let draft = OrderDraft::build(&cart, &tests, None, &Pricing::default()).unwrap();
        let notice = Notice::order_placed(&draft, &confirmation("LT-2024-001", None));
        assert_eq!(
            notice.description,
            "Your lab tests have been scheduled. You'll receive confirmation shortly."
        );
        assert_eq!(notice.reference.as_deref(), Some("LT-2024-001"));
    }

    #[test]
    fn test_failure_notice() {
        let notice = Notice::order_failed(&CheckoutError::Gateway(GatewayError::Unauthorized));
        assert!(!notice.is_success());
        assert_eq!(notice.title, "Order Failed");
        assert!(notice.description.contains("Unauthorized"));
        assert!(notice.reference.is_none());
    }

    #[test]
    fn test_serializes_level_lowercase() {
        let notice = Notice::order_failed(&CheckoutError::EmptyCart);
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["level"], "error");
        assert!(json.get("reference").is_none());
    }
}
