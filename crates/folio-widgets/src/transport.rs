#![forbid(unsafe_code)]

//! Outbound delivery of contact messages.
//!
//! The real delivery mechanism (mail relay, form service) lives outside this
//! crate. The page only sees [`ContactTransport`].

use std::fmt;

use crate::contact_form::ContactPayload;

/// Delivery failure, carried into `SubmissionState::Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for TransportError {}

/// Sends one contact message.
pub trait ContactTransport: Send + Sync {
    fn send(&self, payload: &ContactPayload) -> Result<(), TransportError>;
}

/// Accepts everything and logs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransport;

impl ContactTransport for LoggingTransport {
    fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        tracing::info!(
            name = %payload.name,
            email = %payload.email,
            subject = %payload.subject,
            message_len = payload.message.len(),
            "contact form submitted"
        );
        Ok(())
    }
}

impl<T: ContactTransport + ?Sized> ContactTransport for std::sync::Arc<T> {
    fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}
