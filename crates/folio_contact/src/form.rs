//! Contact form state
//!
//! Submission is split in two so that no borrow of the form is held while
//! the delivery call is in flight:
//!
//! 1. [`ContactForm::begin_submit`] validates and raises the `submitting`
//!    guard, handing back the fields to send,
//! 2. [`ContactForm::finish_submit`] settles the outcome.
//!
//! A success banner reverts to idle five seconds after it is shown; the
//! revert timer is driven through [`ContactForm::poll`].

use std::time::{Duration, Instant};

use folio_animation::{TimerId, TimerQueue};

use crate::delivery::DeliveryResponse;
use crate::error::{DeliveryError, SEND_FAILED};
use crate::validate::{validate, ContactFields, Field, ValidationErrors};

/// How long the success banner stays up
pub const SUCCESS_BANNER: Duration = Duration::from_millis(5000);

/// Outcome of the last submission, as shown to the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitResult {
    #[default]
    Idle,
    Success,
    Failure(String),
}

/// Why [`ContactForm::begin_submit`] declined to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight
    InFlight,
    /// Validation failed; errors are now on the form
    Invalid(ValidationErrors),
}

#[derive(Debug, Default)]
pub struct ContactForm {
    fields: ContactFields,
    consent: bool,
    errors: ValidationErrors,
    submitting: bool,
    result: SubmitResult,
    timers: TimerQueue<()>,
    banner: Option<TimerId>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn result(&self) -> &SubmitResult {
        &self.result
    }

    /// Edit a text field, clearing its error
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.fields.set(field, value) {
            self.errors.remove(&field);
        }
    }

    /// Tick or untick the privacy checkbox, clearing its error
    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
        self.errors.remove(&Field::Privacy);
    }

    /// Hide the failure banner
    pub fn dismiss_error(&mut self) {
        if matches!(self.result, SubmitResult::Failure(_)) {
            self.result = SubmitResult::Idle;
        }
    }

    /// Validate and raise the submitting guard
    ///
    /// Returns the fields to deliver. While a submission is in flight this
    /// does nothing.
    pub fn begin_submit(&mut self) -> Result<ContactFields, SubmitBlocked> {
        if self.submitting {
            tracing::debug!("submit ignored, delivery in flight");
            return Err(SubmitBlocked::InFlight);
        }

        self.errors = validate(&self.fields, self.consent);
        if !self.errors.is_empty() {
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        }

        self.submitting = true;
        self.dismiss_error();
        Ok(self.fields.clone())
    }

    /// Settle a submission started by [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(
        &mut self,
        outcome: Result<DeliveryResponse, DeliveryError>,
        now: Instant,
    ) -> &SubmitResult {
        self.submitting = false;

        self.result = match outcome {
            Ok(response) if response.is_success() => {
                self.fields = ContactFields::default();
                self.consent = false;
                if let Some(previous) = self.banner.take() {
                    self.timers.cancel(previous);
                }
                self.banner = Some(self.timers.schedule(now, SUCCESS_BANNER, ()));
                tracing::info!("contact message delivered");
                SubmitResult::Success
            }
            Ok(response) => {
                tracing::warn!("contact delivery rejected with status {}", response.status);
                SubmitResult::Failure(SEND_FAILED.to_string())
            }
            Err(err) => {
                tracing::warn!("contact delivery failed: {}", err);
                SubmitResult::Failure(err.user_message())
            }
        };
        &self.result
    }

    /// Lower the submitting guard for a delivery that will never settle
    ///
    /// Fields and the previous result are left untouched.
    pub fn abort_submit(&mut self) {
        if self.submitting {
            tracing::debug!("submit abandoned before delivery settled");
            self.submitting = false;
        }
    }

    /// Advance timers; returns true if the success banner was hidden
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timers.poll(now).is_empty() {
            return false;
        }
        self.banner = None;
        if self.result == SubmitResult::Success {
            self.result = SubmitResult::Idle;
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Cancel pending timers (component teardown)
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.banner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Subject, "Hi");
        form.set_field(Field::Message, "Long enough message");
        form.set_consent(true);
        form
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let mut form = ContactForm::new();
        match form.begin_submit() {
            Err(SubmitBlocked::Invalid(errors)) => assert_eq!(errors.len(), 5),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!form.is_submitting());
        assert_eq!(form.errors().len(), 5);
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let mut form = ContactForm::new();
        let _ = form.begin_submit();

        form.set_field(Field::Email, "x");
        assert_eq!(form.error(Field::Email), None);
        assert_eq!(form.error(Field::Name), Some("Name is required"));

        form.set_consent(true);
        assert_eq!(form.error(Field::Privacy), None);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_noop() {
        let mut form = filled();
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_abort_lowers_guard_and_keeps_fields() {
        let mut form = filled();
        assert!(form.begin_submit().is_ok());

        form.abort_submit();
        assert!(!form.is_submitting());
        assert_eq!(form.fields().name, "Ada");
        assert_eq!(form.result(), &SubmitResult::Idle);
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_success_resets_and_reverts_after_banner() {
        let start = Instant::now();
        let mut form = filled();
        form.begin_submit().unwrap();

        assert_eq!(form.finish_submit(Ok(DeliveryResponse::ok()), start), &SubmitResult::Success);
        assert_eq!(form.fields(), &ContactFields::default());
        assert!(!form.consent());
        assert!(!form.is_submitting());

        assert!(!form.poll(start + Duration::from_millis(4999)));
        assert_eq!(form.result(), &SubmitResult::Success);
        assert!(form.poll(start + SUCCESS_BANNER));
        assert_eq!(form.result(), &SubmitResult::Idle);
    }

    #[test]
    fn test_failure_preserves_fields() {
        let start = Instant::now();
        let mut form = filled();
        let sent = form.begin_submit().unwrap();

        let rejected = DeliveryResponse {
            status: 412,
            text: "bad".into(),
        };
        form.finish_submit(Ok(rejected), start);
        assert_eq!(form.result(), &SubmitResult::Failure("Failed to send email".into()));
        assert_eq!(form.fields(), &sent);
        assert!(form.consent());

        form.dismiss_error();
        assert_eq!(form.result(), &SubmitResult::Idle);
    }

    #[test]
    fn test_fault_message_is_shown() {
        let start = Instant::now();
        let mut form = filled();

        form.begin_submit().unwrap();
        form.finish_submit(Err(DeliveryError::Fault("network down".into())), start);
        assert_eq!(form.result(), &SubmitResult::Failure("network down".into()));

        // Resubmitting clears the previous failure
        form.begin_submit().unwrap();
        assert_eq!(form.result(), &SubmitResult::Idle);
        form.finish_submit(Err(DeliveryError::Fault(String::new())), start);
        assert_eq!(
            form.result(),
            &SubmitResult::Failure("An unexpected error occurred".into())
        );
    }

    #[test]
    fn test_teardown_cancels_banner_timer() {
        let start = Instant::now();
        let mut form = filled();
        form.begin_submit().unwrap();
        form.finish_submit(Ok(DeliveryResponse::ok()), start);

        form.teardown();
        assert_eq!(form.next_deadline(), None);
        assert!(!form.poll(start + Duration::from_secs(10)));
        assert_eq!(form.result(), &SubmitResult::Success);
    }
}
