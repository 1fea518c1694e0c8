//! # paycard - Paycard e-payment gateway client
//!
//! An async client for the Paycard e-payment gateway. It creates payments,
//! polls their status, validates requests locally and turns every failure
//! into a single [`PaymentError`] tagged with a [`PaymentErrorKind`].
//!
//! ```no_run
//! use paycard::{CreatePaymentRequest, PaycardClient, PaymentMethod};
//!
//! # async fn run() -> paycard::Result<()> {
//! let client = PaycardClient::new("merchant-api-key");
//! let request = CreatePaymentRequest::new(5000, "Order #42", PaymentMethod::OrangeMoney)
//!     .with_reference("order-42")
//!     .with_callback_url("https://shop.example.com/paycard/return");
//!
//! let payment = client.create_payment(&request).await?;
//! println!("send the payer to {}", payment.payment_url);
//!
//! let status = client.get_payment_status("order-42").await?;
//! println!("status: {}", status.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use client::PaycardClient;
pub use config::{ConfigError, PaycardConfig};
pub use error::{PaymentError, PaymentErrorKind, Result, TransportError};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::*;
pub use validation::is_valid_url;

/// Current version of the paycard library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
