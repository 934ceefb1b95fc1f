//! Technical inquiry submission.
//!
//! An inquiry is a contact form plus a snapshot of the inquiry list at the
//! moment of submission. Processing is simulated: the payload is logged and
//! a receipt is produced after a configurable delay. The cart is never
//! modified by a submission.

use std::time::Duration;

use chrono::{DateTime, Utc};
use imex_core::{Email, EmailError, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};

/// Notification emitted once an inquiry is processed.
pub const SUCCESS_MESSAGE: &str = "Technical inquiry sent successfully!";

/// Minimum length of a technical description before the hint turns green.
pub const SPEC_TEXT_MIN_CHARS: usize = 10;

/// Errors from inquiry validation and processing.
#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("Please enter a valid email address.")]
    InvalidEmail(#[from] EmailError),

    #[error("Name and message are required.")]
    MissingField,

    #[error("Inquiry was cancelled")]
    Cancelled,

    #[error("Inquiry processing failed: {0}")]
    Failed(String),
}

/// Contact form as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// Validated contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryContact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl InquiryForm {
    /// Trim fields and check the required ones.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::InvalidEmail` for a malformed address and
    /// `InquiryError::MissingField` for a blank name or message.
    pub fn validate(self) -> Result<InquiryContact, InquiryError> {
        let email = Email::parse(&self.email)?;

        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(InquiryError::MissingField);
        }

        Ok(InquiryContact {
            name: name.to_owned(),
            company: non_blank(self.company),
            email,
            phone: non_blank(self.phone),
            message: message.to_owned(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Live hint for the technical description field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecTextState {
    Empty,
    TooShort,
    Ok,
}

impl SpecTextState {
    /// Identifier used in CSS classes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::Ok => "ok",
        }
    }
}

/// Classify a technical description by length.
///
/// Only a hint; it never blocks submission.
#[must_use]
pub fn spec_text_state(text: &str) -> SpecTextState {
    match text.chars().count() {
        0 => SpecTextState::Empty,
        n if n < SPEC_TEXT_MIN_CHARS => SpecTextState::TooShort,
        _ => SpecTextState::Ok,
    }
}

/// Contact details plus the inquiry list they refer to.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryPayload {
    pub contact: InquiryContact,
    pub lines: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub total_weight: Weight,
}

impl InquiryPayload {
    /// Snapshot `cart` alongside the contact details.
    #[must_use]
    pub fn new(contact: InquiryContact, cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            contact,
            lines: cart.items().to_vec(),
            total_price: totals.price,
            total_weight: totals.weight,
        }
    }
}

/// Proof that an inquiry was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InquiryReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

/// An inquiry in flight.
#[derive(Debug)]
pub struct PendingInquiry {
    handle: JoinHandle<InquiryReceipt>,
}

impl PendingInquiry {
    /// Abort processing. A subsequent [`wait`](Self::wait) yields
    /// `InquiryError::Cancelled`.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the receipt.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Cancelled` if the inquiry was aborted and
    /// `InquiryError::Failed` if the processing task panicked.
    pub async fn wait(self) -> Result<InquiryReceipt, InquiryError> {
        self.handle.await.map_err(|e| {
            if e.is_cancelled() {
                InquiryError::Cancelled
            } else {
                InquiryError::Failed(e.to_string())
            }
        })
    }
}

/// Simulated inquiry backend.
#[derive(Debug, Clone, Copy)]
pub struct InquiryProcessor {
    delay: Duration,
}

impl InquiryProcessor {
    /// Create a processor that takes `delay` per inquiry.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Log `payload` and start processing it.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn dispatch(&self, payload: InquiryPayload) -> PendingInquiry {
        match serde_json::to_string(&payload) {
            Ok(json) => tracing::info!(
                email = %payload.contact.email,
                lines = payload.lines.len(),
                payload = %json,
                "Inquiry data ingestion"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to encode inquiry payload"),
        }

        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let receipt = InquiryReceipt {
                reference: Uuid::new_v4(),
                received_at: Utc::now(),
            };
            tracing::info!(reference = %receipt.reference, "Inquiry processed");
            receipt
        });

        PendingInquiry { handle }
    }
}
