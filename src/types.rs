//! Request and response types for the Paycard e-payment API

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Production host of the gateway
pub const DEFAULT_BASE_URL: &str = "https://mapaycard.com";

/// Path of the payment creation endpoint
pub const CREATE_PAYMENT_PATH: &str = "/epay/create";

/// Path of the status endpoint for a payment reference.
///
/// The reference is inserted verbatim, without percent-encoding; a `?`, `#`
/// or `/` in it changes the request path.
pub fn status_path(api_key: &str, reference: &str) -> String {
    format!("/epay/{}/{}/status", api_key, reference)
}

/// Wire values of the on/off form fields
pub mod flags {
    pub const ON: &str = "on";
    pub const OFF: &str = "off";

    /// Map a boolean to the gateway's on/off representation
    pub fn on_off(value: bool) -> &'static str {
        if value {
            ON
        } else {
            OFF
        }
    }
}

/// Payment method the gateway should present first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Card on file with Paycard
    Paycard,
    /// Credit card
    CreditCard,
    /// Orange Money mobile wallet
    OrangeMoney,
    /// MTN Mobile Money
    Momo,
}

impl PaymentMethod {
    /// All payment methods
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Paycard,
        PaymentMethod::CreditCard,
        PaymentMethod::OrangeMoney,
        PaymentMethod::Momo,
    ];

    /// Name of the routing flag that selects this method
    pub fn routing_flag(&self) -> &'static str {
        match self {
            PaymentMethod::Paycard => "paycard-jump-to-paycard",
            PaymentMethod::CreditCard => "paycard-jump-to-cc",
            PaymentMethod::OrangeMoney => "paycard-jump-to-om",
            PaymentMethod::Momo => "paycard-jump-to-momo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Paycard => "PAYCARD",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::OrangeMoney => "ORANGE_MONEY",
            PaymentMethod::Momo => "MOMO",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown payment method: {}", s))
    }
}

/// Parameters of a new payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Amount in the gateway's currency units
    pub amount: Decimal,
    /// Free text shown to the payer
    pub description: String,
    /// Caller-side tracking reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub payment_method: PaymentMethod,
    /// Absolute URL the gateway returns the payer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_redirect: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_with_get: Option<bool>,
}

impl CreatePaymentRequest {
    /// Create a request with the required fields
    pub fn new(
        amount: impl Into<Decimal>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            reference: None,
            payment_method,
            callback_url: None,
            auto_redirect: None,
            redirect_with_get: None,
        }
    }

    /// Set the operation reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the callback URL
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// Set whether the gateway redirects automatically after payment
    pub fn with_auto_redirect(mut self, auto_redirect: bool) -> Self {
        self.auto_redirect = Some(auto_redirect);
        self
    }

    /// Set whether the redirect uses GET
    pub fn with_redirect_with_get(mut self, redirect_with_get: bool) -> Self {
        self.redirect_with_get = Some(redirect_with_get);
        self
    }
}

/// Gateway reply to a payment creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    /// Result code, 0 on success
    pub code: i64,
    #[serde(default, serialize_with = "serialize_amount")]
    pub payment_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_amount_formatted: Option<String>,
    #[serde(default)]
    pub payment_description: Option<String>,
    #[serde(default)]
    pub operation_reference: Option<String>,
    /// Page the payer must be sent to
    pub payment_url: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Gateway reply to a status query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    /// Result code, 0 on success
    pub code: i64,
    #[serde(default)]
    pub transaction_date: Option<String>,
    /// Gateway status code, e.g. `SUCCESS` or `PENDING`
    pub status: String,
    #[serde(default)]
    pub status_description: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub payment_method_reference: Option<String>,
    /// Raw amount as sent by the gateway
    #[serde(default, deserialize_with = "string_or_number")]
    pub payment_amount: Option<String>,
    #[serde(default)]
    pub payment_amount_formatted: Option<String>,
    #[serde(default)]
    pub ecommerce_description: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
}

/// Write an amount as a JSON number, integral when possible
pub(crate) fn amount_to_json(amount: &Decimal) -> Value {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        if let Some(integer) = normalized.to_i64() {
            return Value::Number(Number::from(integer));
        }
    }
    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(normalized.to_string()))
}

fn serialize_amount<S>(amount: &Option<Decimal>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount {
        Some(amount) => amount_to_json(amount).serialize(serializer),
        None => serializer.serialize_none(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routing_flags_are_distinct() {
        let mut flags: Vec<_> = PaymentMethod::ALL.iter().map(|m| m.routing_flag()).collect();
        flags.sort();
        flags.dedup();
        assert_eq!(flags.len(), 4);
        assert_eq!(PaymentMethod::CreditCard.routing_flag(), "paycard-jump-to-cc");
        assert_eq!(PaymentMethod::OrangeMoney.routing_flag(), "paycard-jump-to-om");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("MOMO".parse::<PaymentMethod>(), Ok(PaymentMethod::Momo));
        assert_eq!(
            "credit_card".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CreditCard)
        );
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
        assert_eq!(
            serde_json::to_value(PaymentMethod::OrangeMoney).unwrap(),
            json!("ORANGE_MONEY")
        );
    }

    #[test]
    fn test_request_builder() {
        let request = CreatePaymentRequest::new(100, "Test payment", PaymentMethod::Paycard)
            .with_reference("test-ref")
            .with_callback_url("https://example.com/callback")
            .with_auto_redirect(true);

        assert_eq!(request.amount, Decimal::from(100));
        assert_eq!(request.reference.as_deref(), Some("test-ref"));
        assert_eq!(request.auto_redirect, Some(true));
        assert_eq!(request.redirect_with_get, None);
    }

    #[test]
    fn test_status_path() {
        assert_eq!(status_path("key", "ref-1"), "/epay/key/ref-1/status");
        assert_eq!(status_path("key", "a b/c"), "/epay/key/a b/c/status");
    }

    #[test]
    fn test_amount_to_json() {
        assert_eq!(amount_to_json(&Decimal::from(100)), json!(100));
        assert_eq!(amount_to_json(&Decimal::new(10000, 2)), json!(100));
        assert_eq!(amount_to_json(&Decimal::new(1055, 1)), json!(105.5));
        assert_eq!(amount_to_json(&Decimal::new(125, 2)), json!(1.25));
    }

    #[test]
    fn test_status_response_accepts_numeric_amount() {
        let status: PaymentStatusResponse = serde_json::from_value(json!({
            "code": 0,
            "status": "SUCCESS",
            "payment_amount": 2500,
            "merchant_name": null
        }))
        .unwrap();

        assert_eq!(status.payment_amount.as_deref(), Some("2500"));
        assert_eq!(status.merchant_name, None);
    }

    #[test]
    fn test_create_response_minimal_fields() {
        let response: CreatePaymentResponse = serde_json::from_value(json!({
            "code": 0,
            "payment_amount": 100,
            "payment_description": "Test payment",
            "operation_reference": "test-ref",
            "payment_url": "http://example.com/payment"
        }))
        .unwrap();

        assert_eq!(response.payment_amount, Some(Decimal::from(100)));
        assert_eq!(response.payment_amount_formatted, None);
        assert_eq!(response.error_message, None);
    }

    #[test]
    fn test_create_response_keeps_numeric_amount() {
        let response: CreatePaymentResponse = serde_json::from_value(json!({
            "code": 0,
            "payment_amount": 100,
            "payment_url": "http://example.com/payment"
        }))
        .unwrap();

        let written = serde_json::to_value(&response).unwrap();
        assert_eq!(written["payment_amount"], json!(100));

        let response = CreatePaymentResponse {
            payment_amount: Some(Decimal::new(125, 2)),
            ..response
        };
        assert_eq!(serde_json::to_value(&response).unwrap()["payment_amount"], json!(1.25));

        let response = CreatePaymentResponse {
            payment_amount: None,
            ..response
        };
        assert_eq!(serde_json::to_value(&response).unwrap()["payment_amount"], json!(null));
    }
}
