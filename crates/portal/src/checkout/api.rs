//! Backend REST gateway.
//!
//! Orders are created one line at a time against the hospital backend:
//!
//! - Pharmacy: `POST {base}/pharmacy/orders` with
//!   `{patient_id, medicine_id, quantity, status}`
//! - Lab tests: `POST {base}/lab/orders` with `{patient_id, test_id, status}`,
//!   once per unit since a lab order has no quantity
//!
//! Authentication is a bearer token. Error responses carry a `detail` field,
//! which becomes the error message.
//!
//! The backend only accepts lab orders from doctor, lab worker or hospital
//! admin accounts. A patient token can place pharmacy orders, but its lab
//! orders come back as [`GatewayError::Unauthorized`]. Use a staff token with
//! `MEDIDESK_PATIENT_ID` naming the patient, or keep the lab flow on the
//! simulated gateway.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::gateway::{GatewayError, OrderConfirmation, OrderGateway};
use super::{CheckoutKind, DraftLine, OrderDraft};
use crate::config::ApiConfig;

/// Status of a freshly created order.
const PENDING: &str = "pending";

#[derive(Debug, Serialize)]
struct PharmacyOrderCreate<'a> {
    patient_id: i32,
    medicine_id: i32,
    quantity: u32,
    status: &'a str,
}

#[derive(Debug, Serialize)]
struct LabOrderCreate<'a> {
    patient_id: i32,
    test_id: i32,
    status: &'a str,
}

/// A pharmacy order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PharmacyOrderRead {
    pub id: i64,
    pub patient_id: i32,
    pub medicine_id: i32,
    pub quantity: u32,
    pub status: Option<String>,
    pub ordered_at: NaiveDateTime,
}

/// A lab order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabOrderRead {
    pub id: i64,
    pub patient_id: i32,
    pub test_id: i32,
    pub status: Option<String>,
    pub ordered_at: NaiveDateTime,
}

/// Backend API client submitting orders for one patient.
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<ApiGatewayInner>,
}

struct ApiGatewayInner {
    client: reqwest::Client,
    base_url: String,
    patient_id: i32,
}

impl ApiGateway {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotConfigured`] if the token or patient id is
    /// missing, or [`GatewayError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let token = config
            .token
            .as_ref()
            .ok_or_else(|| {
                GatewayError::NotConfigured("MEDIDESK_API_TOKEN is not set".to_string())
            })?;
        let patient_id = config
            .patient_id
            .ok_or_else(|| {
                GatewayError::NotConfigured("MEDIDESK_PATIENT_ID is not set".to_string())
            })?;

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| GatewayError::NotConfigured(format!("Invalid API token format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiGatewayInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                patient_id,
            }),
        })
    }

    /// Backend id of the ordering patient.
    #[must_use]
    pub fn patient_id(&self) -> i32 {
        self.inner.patient_id
    }

    /// Create one pharmacy order line.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the request fails or the backend rejects it.
    pub async fn create_pharmacy_order(
        &self,
        medicine_id: i32,
        quantity: u32,
    ) -> Result<PharmacyOrderRead, GatewayError> {
        let body = PharmacyOrderCreate {
            patient_id: self.inner.patient_id,
            medicine_id,
            quantity,
            status: PENDING,
        };
        self.post("/pharmacy/orders", &body).await
    }

    /// Create one lab order for the configured patient.
    ///
    /// The token must belong to a doctor, lab worker or hospital admin.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] for a token without one of
    /// those roles, or another [`GatewayError`] if the request fails.
    pub async fn create_lab_order(&self, test_id: i32) -> Result<LabOrderRead, GatewayError> {
        let body = LabOrderCreate {
            patient_id: self.inner.patient_id,
            test_id,
            status: PENDING,
        };
        self.post("/lab/orders", &body).await
    }

    /// Execute a POST request against the backend.
    async fn post<T: serde::de::DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| GatewayError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Map an error response to a [`GatewayError`].
    async fn parse_error(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GatewayError::RateLimited(retry_after);
        }

        if status == 401 || status == 403 {
            return GatewayError::Unauthorized;
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = error_detail(&text).unwrap_or(text);

        if status == 404 {
            return GatewayError::NotFound(message);
        }

        GatewayError::Api { status, message }
    }

    /// Create the backend orders for one draft line.
    async fn submit_line(
        &self,
        kind: CheckoutKind,
        line: &DraftLine,
    ) -> Result<Vec<i64>, GatewayError> {
        match kind {
            CheckoutKind::Pharmacy => {
                let order = self.create_pharmacy_order(line.item_id, line.quantity).await?;
                Ok(vec![order.id])
            }
            CheckoutKind::LabTests => {
                let mut ids = Vec::new();
                for _ in 0..line.quantity {
                    ids.push(self.create_lab_order(line.item_id).await?.id);
                }
                Ok(ids)
            }
        }
    }
}

/// Extract the `detail` field of an error body.
///
/// Validation errors carry a list of objects rather than a string; those are
/// returned as compact JSON.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

impl OrderGateway for ApiGateway {
    #[instrument(skip_all, fields(kind = %draft.kind, patient_id = self.inner.patient_id))]
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderConfirmation, GatewayError> {
        let mut backend_ids = Vec::new();

        for line in &draft.lines {
            match self.submit_line(draft.kind, line).await {
                Ok(ids) => {
                    debug!(item_id = line.item_id, ?ids, "Order line created");
                    backend_ids.extend(ids);
                }
                Err(e) => {
                    if !backend_ids.is_empty() {
                        warn!(?backend_ids, "Order partially created before failure");
                    }
                    return Err(e);
                }
            }
        }

        let reference = backend_ids.first().map_or_else(
            || draft.kind.reference_prefix().to_string(),
            |first| format!("{}-{first}", draft.kind.reference_prefix()),
        );

        Ok(OrderConfirmation {
            reference,
            estimated_time: draft.fulfilment.map(|f| f.estimated_time().to_string()),
            backend_ids,
            placed_at: Utc::now(),
        })
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.inner.base_url)
            .field("patient_id", &self.inner.patient_id)
            .finish_non_exhaustive()
    }
}
