//! Paycard gateway client

use crate::config::PaycardConfig;
use crate::error::{PaymentError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::*;
use crate::validation::validate_create_request;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for creating payments and polling their status.
///
/// Holds no per-call state: clones share the transport and calls may run
/// concurrently.
#[derive(Clone)]
pub struct PaycardClient {
    /// Merchant API key
    api_key: String,
    /// Transport used for every gateway call
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PaycardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaycardClient")
            .field("api_key", &"<redacted>")
            .field("transport", &"<transport>")
            .finish()
    }
}

impl PaycardClient {
    /// Create a client for the production gateway
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, Arc::new(HttpTransport::default()))
    }

    /// Create a client for another gateway host
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&PaycardConfig::new(api_key).with_base_url(base_url))
    }

    /// Create a client from a [`PaycardConfig`]
    pub fn from_config(config: &PaycardConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| PaymentError::unknown(format!("Invalid configuration: {}", e)))?;

        let transport = HttpTransport::new(config.base_url.as_str(), config.timeout).map_err(|e| {
            PaymentError::unknown(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self::with_transport(config.api_key.clone(), Arc::new(transport)))
    }

    /// Create a client on top of a caller-supplied transport
    pub fn with_transport(api_key: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_key: api_key.into(),
            transport,
        }
    }

    /// Get the API key this client authenticates with
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Create a payment and return the page the payer must visit.
    ///
    /// The amount and callback URL are checked locally first; a rejected
    /// request never reaches the network.
    pub async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse> {
        validate_create_request(request)?;

        let payload = self.create_payment_payload(request);

        debug!(
            method = %request.payment_method,
            reference = request.reference.as_deref().unwrap_or_default(),
            "Creating payment"
        );

        let response = self.transport.post(CREATE_PAYMENT_PATH, &payload).await?;
        let created: CreatePaymentResponse = interpret_response(response.data)?;

        debug!(payment_url = %created.payment_url, "Payment created");
        Ok(created)
    }

    /// Query the status of the payment identified by `reference`.
    ///
    /// The reference is embedded in the request path as is, without
    /// percent-encoding. Callers using references that contain `?`, `#` or
    /// `/` must encode them first.
    pub async fn get_payment_status(&self, reference: &str) -> Result<PaymentStatusResponse> {
        debug!(reference, "Querying payment status");

        let response = self
            .transport
            .get(&status_path(&self.api_key, reference))
            .await?;
        let status: PaymentStatusResponse = interpret_response(response.data)?;

        debug!(reference, status = %status.status, "Payment status received");
        Ok(status)
    }

    fn create_payment_payload(&self, request: &CreatePaymentRequest) -> Value {
        let mut payload = json!({
            "c": self.api_key,
            "paycard-amount": amount_to_json(&request.amount),
            "paycard-description": non_empty(Some(request.description.as_str())),
            "paycard-operation-reference": non_empty(request.reference.as_deref()),
            "paycard-callback-url": non_empty(request.callback_url.as_deref()),
            "paycard-auto-redirect": flags::on_off(request.auto_redirect.unwrap_or(false)),
            "paycard-redirect-with-get": flags::on_off(request.redirect_with_get.unwrap_or(false)),
        });

        // Only the selected method's flag is sent; the others are omitted.
        payload[request.payment_method.routing_flag()] = Value::String(flags::ON.to_string());
        payload
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Check the gateway result code and decode a successful body
fn interpret_response<T: DeserializeOwned>(data: Value) -> Result<T> {
    let code = data
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| PaymentError::api_call_failed("response has no numeric result code"))?;

    if code != 0 {
        let message = data.get("error_message").and_then(Value::as_str);
        warn!(code, error_message = message.unwrap_or_default(), "Gateway rejected request");
        return Err(PaymentError::gateway_error(message));
    }

    serde_json::from_value(data)
        .map_err(|e| PaymentError::api_call_failed(format!("invalid response format: {}", e)))
}
