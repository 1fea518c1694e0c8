//! Create a payment and poll its status against the configured gateway.
//!
//! ```sh
//! PAYCARD_API_KEY=... RUST_LOG=paycard=debug cargo run --example paycard_demo
//! ```

use paycard::{CreatePaymentRequest, PaycardClient, PaycardConfig, PaymentMethod};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PaycardConfig::from_env()?;
    let client = PaycardClient::from_config(&config)?;

    let reference = std::env::args().nth(1).unwrap_or_else(|| "demo-ref".to_string());
    let request = CreatePaymentRequest::new(100, "Demo payment", PaymentMethod::Paycard)
        .with_reference(reference.clone())
        .with_callback_url("http://example.com/callback")
        .with_auto_redirect(true);

    match client.create_payment(&request).await {
        Ok(payment) => info!(payment_url = %payment.payment_url, "Payment created"),
        Err(e) => {
            error!(kind = %e.kind(), "Payment creation failed: {}", e);
            return Err(e.into());
        }
    }

    match client.get_payment_status(&reference).await {
        Ok(status) => info!(
            status = %status.status,
            description = status.status_description.as_deref().unwrap_or_default(),
            "Payment status"
        ),
        Err(e) => error!(kind = %e.kind(), "Status query failed: {}", e),
    }

    Ok(())
}
