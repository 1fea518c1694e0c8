//! Local checks run before any request reaches the gateway

use crate::error::{PaymentError, Result};
use crate::types::CreatePaymentRequest;
use rust_decimal::Decimal;
use url::Url;

/// True when `url` is an absolute URL with a scheme and a host.
///
/// Purely syntactic; the target is never contacted.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

/// Reject zero and negative amounts
pub fn validate_amount(amount: &Decimal) -> Result<()> {
    if *amount <= Decimal::ZERO {
        return Err(PaymentError::invalid_amount("Amount must be greater than 0"));
    }
    Ok(())
}

/// Reject a callback URL that is present but malformed.
///
/// An empty string counts as absent.
pub fn validate_callback_url(callback_url: Option<&str>) -> Result<()> {
    match callback_url {
        Some(url) if !url.is_empty() && !is_valid_url(url) => Err(
            PaymentError::invalid_callback_url("Callback URL must be a valid URL"),
        ),
        _ => Ok(()),
    }
}

/// Validate a payment request; the amount is checked before the callback URL.
pub fn validate_create_request(request: &CreatePaymentRequest) -> Result<()> {
    validate_amount(&request.amount)?;
    validate_callback_url(request.callback_url.as_deref())
}
