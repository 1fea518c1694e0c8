//! Shared helpers for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use paycard::{Transport, TransportError, TransportResponse};
use serde_json::{json, Value};
use std::sync::Mutex;

/// A call seen by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Post { path: String, body: Value },
    Get { path: String },
}

/// What [`RecordingTransport`] answers with
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    NetworkError(String),
}

/// In-process transport that records every call and replies deterministically
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn replying(data: Value) -> Self {
        Self {
            reply: Reply::Json(data),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::NetworkError(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn answer(&self) -> Result<TransportResponse, TransportError> {
        match &self.reply {
            Reply::Json(data) => Ok(TransportResponse {
                status: 200,
                data: data.clone(),
            }),
            Reply::NetworkError(message) => Err(TransportError::other(message.clone())),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall::Post {
            path: path.to_string(),
            body: body.clone(),
        });
        self.answer()
    }

    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall::Get {
            path: path.to_string(),
        });
        self.answer()
    }
}

pub fn created_payment_body() -> Value {
    json!({
        "code": 0,
        "payment_amount": 100,
        "payment_description": "Test payment",
        "operation_reference": "test-ref",
        "payment_url": "http://example.com/payment"
    })
}

pub fn payment_status_body() -> Value {
    json!({
        "code": 0,
        "status": "SUCCESS",
        "status_description": "Payment successful",
        "error_message": "",
        "payment_amount": "100",
        "payment_amount_formatted": "100",
        "ecommerce_description": "Test payment",
        "reference": "test-ref"
    })
}
