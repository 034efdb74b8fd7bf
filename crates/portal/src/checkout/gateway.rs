//! The order submission port and its errors.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::OrderDraft;
use super::api::ApiGateway;
use super::simulated::SimulatedGateway;
use crate::config::{GatewayKind, PortalConfig};

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (missing or expired token, or wrong role).
    #[error("Unauthorized: the backend rejected the API token")]
    Unauthorized,

    /// Gateway cannot be built from the configuration.
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),
}

/// Receipt for a submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Order reference shown to the patient, e.g. `PH-3F2A9C1B`.
    pub reference: String,
    /// Estimated time until the order is ready, when the flow has one.
    pub estimated_time: Option<String>,
    /// Ids assigned by the backend, one per submitted line.
    #[serde(default)]
    pub backend_ids: Vec<i64>,
    pub placed_at: DateTime<Utc>,
}

/// Something that accepts priced orders.
pub trait OrderGateway {
    /// Submit `draft`, resolving once the order is accepted or rejected.
    fn submit(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<OrderConfirmation, GatewayError>> + Send;
}

/// The gateway selected by configuration.
#[derive(Debug, Clone)]
pub enum Gateway {
    Simulated(SimulatedGateway),
    Api(ApiGateway),
}

impl Gateway {
    /// Build the gateway named by `config.gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotConfigured`] if the API gateway is selected
    /// without a token or patient id, or [`GatewayError::Http`] if the HTTP
    /// client fails to build.
    pub fn from_config(config: &PortalConfig) -> Result<Self, GatewayError> {
        Ok(match config.gateway {
            GatewayKind::Simulated => {
                Self::Simulated(SimulatedGateway::new(config.simulated_delay))
            }
            GatewayKind::Api => Self::Api(ApiGateway::new(&config.api)?),
        })
    }
}

impl OrderGateway for Gateway {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderConfirmation, GatewayError> {
        match self {
            Self::Simulated(gateway) => gateway.submit(draft).await,
            Self::Api(gateway) => gateway.submit(draft).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_from_config_defaults_to_simulated() {
        let config = PortalConfig::from_lookup(|_| None).unwrap();
        let gateway = Gateway::from_config(&config).unwrap();
        assert!(matches!(gateway, Gateway::Simulated(_)));
    }

    #[test]
    fn test_from_config_builds_api_gateway() {
        let vars: HashMap<&str, &str> = [
            ("MEDIDESK_GATEWAY", "api"),
            ("MEDIDESK_API_TOKEN", "eyJhbGciOiJIUzI1NiJ9.aB3xY9mK2nL5pQ7rT0uW4zC6"),
            ("MEDIDESK_PATIENT_ID", "3"),
        ]
        .into_iter()
        .collect();
        let config =
            PortalConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();
        let gateway = Gateway::from_config(&config).unwrap();
        assert!(matches!(gateway, Gateway::Api(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = GatewayError::Api {
            status: 422,
            message: "quantity must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 422 - quantity must be positive");
        assert_eq!(
            GatewayError::RateLimited(30).to_string(),
            "Rate limited, retry after 30 seconds"
        );
    }
}
