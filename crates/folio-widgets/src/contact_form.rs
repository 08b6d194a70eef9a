#![forbid(unsafe_code)]

//! Contact form submission lifecycle.
//!
//! The form owns the draft the visitor is typing, validates it on submit,
//! and walks a small state machine while the transport does its work:
//!
//! ```text
//!            submit (valid)            resolve(Ok)
//!   Idle ─────────────────▶ Submitting ───────────▶ Succeeded ──(reset_due)──▶ Idle
//!    ▲                          │
//!    │                          └── resolve(Err) ──▶ Failed { reason }
//!    └──────── submit from Succeeded / Failed settles here first
//! ```
//!
//! Every accepted submission bumps a generation counter and hands back a
//! [`SubmissionTicket`]. Transport outcomes and reset timers carry their
//! ticket, so anything belonging to an older submission is ignored.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use bitflags::bitflags;
use regex_lite::Regex;
use serde::Serialize;

use crate::transport::TransportError;

/// How long the success confirmation stays up.
pub const SUCCESS_RESET_AFTER: Duration = Duration::from_secs(5);

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The matching single-bit set.
    #[must_use]
    pub const fn flag(self) -> FieldSet {
        match self {
            Self::Name => FieldSet::NAME,
            Self::Email => FieldSet::EMAIL,
            Self::Subject => FieldSet::SUBJECT,
            Self::Message => FieldSet::MESSAGE,
        }
    }

    /// Input name as the markup uses it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

bitflags! {
    /// A set of form fields, used to report which inputs are invalid.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u8 {
        const NAME    = 0b0001;
        const EMAIL   = 0b0010;
        const SUBJECT = 0b0100;
        const MESSAGE = 0b1000;
    }
}

/// What gets handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactPayload {
    /// Build a payload from its four fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Check every field. Whitespace-only input counts as empty.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for field in Field::ALL {
            let value = self.get(field).trim();
            let message = if value.is_empty() {
                match field {
                    Field::Name => Some("Name is required"),
                    Field::Email => Some("Email is required"),
                    Field::Subject => Some("Subject is required"),
                    Field::Message => Some("Message is required"),
                }
            } else if field == Field::Email && !EMAIL.is_match(value) {
                Some("Invalid email address")
            } else {
                None
            };
            if let Some(message) = message {
                errors.push(FieldError { field, message });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every rejected field of one submit attempt, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Fields that failed.
    #[must_use]
    pub fn fields(&self) -> FieldSet {
        self.errors
            .iter()
            .fold(FieldSet::empty(), |set, e| set | e.field.flag())
    }

    /// Message for a field, if it failed.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field.as_str(), e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Why a submit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more fields failed validation.
    Invalid(ValidationErrors),
    /// A submission is already in flight.
    InFlight,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "invalid contact form: {errors}"),
            Self::InFlight => write!(f, "a submission is already in flight"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::InFlight => None,
        }
    }
}

impl From<ValidationErrors> for SubmitError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

/// Where the submission lifecycle stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed { reason: String },
}

impl SubmissionState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Identifies one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Submit button as the view renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

/// The contact form store.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    draft: ContactPayload,
    state: SubmissionState,
    generation: u64,
    errors: Option<ValidationErrors>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one draft input. Clears that field's error once it is edited.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        if let Some(errors) = &mut self.errors {
            errors.errors.retain(|e| e.field != field);
            if errors.is_empty() {
                self.errors = None;
            }
        }
    }

    #[must_use]
    pub fn draft(&self) -> &ContactPayload {
        &self.draft
    }

    /// Submit the current draft.
    pub fn submit_draft(&mut self) -> Result<SubmissionTicket, SubmitError> {
        let payload = self.draft.clone();
        self.submit(&payload)
    }

    /// Validate `payload` and start a submission.
    ///
    /// From `Succeeded` or `Failed` the form settles back to `Idle` first,
    /// which invalidates the previous ticket and its pending reset. A
    /// payload that fails validation leaves the state exactly as it was.
    pub fn submit(&mut self, payload: &ContactPayload) -> Result<SubmissionTicket, SubmitError> {
        if self.state == SubmissionState::Submitting {
            tracing::debug!(generation = self.generation, "submit rejected: in flight");
            return Err(SubmitError::InFlight);
        }
        if let Err(errors) = payload.validate() {
            tracing::debug!(fields = ?errors.fields(), "submit rejected: invalid fields");
            self.errors = Some(errors.clone());
            return Err(errors.into());
        }
        self.errors = None;
        self.generation += 1;
        let from = self.state.name();
        self.state = SubmissionState::Submitting;
        tracing::debug!(generation = self.generation, from, "submission started");
        Ok(SubmissionTicket(self.generation))
    }

    /// Apply the transport outcome for `ticket`.
    ///
    /// Returns `false` (and changes nothing) for a stale ticket or when no
    /// submission is in flight.
    pub fn resolve(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<(), TransportError>,
    ) -> bool {
        if !self.is_current(ticket) || self.state != SubmissionState::Submitting {
            tracing::debug!(
                ticket = ticket.0,
                generation = self.generation,
                "ignoring stale submission outcome"
            );
            return false;
        }
        self.state = match outcome {
            Ok(()) => {
                self.draft = ContactPayload::default();
                tracing::info!(generation = self.generation, "message sent");
                SubmissionState::Succeeded
            }
            Err(err) => {
                tracing::warn!(generation = self.generation, error = %err, "message failed");
                SubmissionState::Failed {
                    reason: err.to_string(),
                }
            }
        };
        true
    }

    /// The success-reset timer for `ticket` has elapsed.
    ///
    /// Only a `Succeeded` state that still belongs to `ticket` returns to `Idle`.
    pub fn reset_due(&mut self, ticket: SubmissionTicket) -> bool {
        if self.is_current(ticket) && self.state == SubmissionState::Succeeded {
            self.state = SubmissionState::Idle;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Ticket of the latest accepted submission, if any.
    #[must_use]
    pub fn current_ticket(&self) -> Option<SubmissionTicket> {
        (self.generation > 0).then_some(SubmissionTicket(self.generation))
    }

    /// Errors from the last rejected submit, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    #[must_use]
    pub fn button(&self) -> SubmitButton {
        match self.state {
            SubmissionState::Submitting => SubmitButton {
                label: "Sending...",
                disabled: true,
            },
            SubmissionState::Succeeded => SubmitButton {
                label: "Message Sent!",
                disabled: false,
            },
            SubmissionState::Idle | SubmissionState::Failed { .. } => SubmitButton {
                label: "Send Message",
                disabled: false,
            },
        }
    }

    fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.0 == self.generation
    }
}
