use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::newsletter::NewsletterGate;
use crate::client::submission::{endpoints, SubmissionTransport, GENERIC_FAILURE_MESSAGE};
use crate::model::submission::ContactSubmission;
use crate::util::validation::{fields, sanitize_phone_input, validate_form, FieldErrorMap, FormRules};

/// How long a success acknowledgment stays up before the form returns to
/// `Editing` on its own.
pub const AUTO_RESET_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    /// Booking inquiry: phone required, fixed 10 digits, timed auto-reset.
    Booking,
    /// General contact: phone optional, loose shape.
    General,
    /// Newsletter signup: email only.
    Newsletter,
}

#[derive(Debug, Clone, Copy)]
pub struct FormConfig {
    pub variant: FormVariant,
    pub rules: FormRules,
    pub endpoint: &'static str,
    /// When set, a successful submission returns to `Editing` after this
    /// delay; when unset the acknowledgment stays until dismissed.
    pub auto_reset: Option<Duration>,
}

impl FormConfig {
    pub fn booking() -> Self {
        FormConfig {
            variant: FormVariant::Booking,
            rules: FormRules::booking(),
            endpoint: endpoints::CONTACT,
            auto_reset: Some(AUTO_RESET_DELAY),
        }
    }

    pub fn general() -> Self {
        FormConfig {
            variant: FormVariant::General,
            rules: FormRules::general(),
            endpoint: endpoints::CONTACT,
            auto_reset: None,
        }
    }

    pub fn newsletter() -> Self {
        FormConfig {
            variant: FormVariant::Newsletter,
            rules: FormRules::newsletter(),
            endpoint: endpoints::SUBSCRIBE,
            auto_reset: Some(AUTO_RESET_DELAY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Success,
    Failed,
}

/// State machine owning one form instance: field values, the error map,
/// the submission lifecycle and the auto-reset deadline. No two forms
/// share a controller.
pub struct FormController {
    config: FormConfig,
    submission: ContactSubmission,
    errors: FieldErrorMap,
    state: FormState,
    status_message: Option<String>,
    auto_reset_at: Option<Instant>,
    newsletter_gate: Option<NewsletterGate>,
}

impl FormController {
    pub fn new(config: FormConfig) -> Self {
        FormController {
            config,
            submission: ContactSubmission::default(),
            errors: FieldErrorMap::new(),
            state: FormState::Editing,
            status_message: None,
            auto_reset_at: None,
            newsletter_gate: None,
        }
    }

    /// Attach the newsletter gate so a successful signup is remembered and
    /// the visitor is not prompted again.
    pub fn with_newsletter_gate(mut self, gate: NewsletterGate) -> Self {
        self.newsletter_gate = Some(gate);
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submission(&self) -> &ContactSubmission {
        &self.submission
    }

    pub fn errors(&self) -> &FieldErrorMap {
        &self.errors
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Record a keystroke. Clears only this field's error; editing after a
    /// failed submission puts the machine back into `Editing`.
    pub fn set_field(&mut self, field: &str, value: &str) {
        let value = match (field, self.config.rules.phone.digit_count) {
            (fields::PHONE, Some(count)) => sanitize_phone_input(value, count),
            _ => value.to_string(),
        };

        match field {
            fields::NAME => self.submission.name = value,
            fields::EMAIL => self.submission.email = value,
            fields::PHONE => self.submission.phone = value,
            fields::MESSAGE => self.submission.message = value,
            other => {
                debug!("Ignoring edit for unknown field {:?}", other);
                return;
            }
        }

        self.errors.remove(field);
        if self.state == FormState::Failed {
            self.state = FormState::Editing;
            self.status_message = None;
        }
    }

    /// Recompute the derived `dates` string from the date-range control.
    /// It rides along in the payload but never participates in validation.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.submission.dates = format!(
            "{} - {}",
            start.format("%b %d, %Y"),
            end.format("%b %d, %Y")
        );
    }

    pub fn clear_date_range(&mut self) {
        self.submission.dates.clear();
    }

    /// Run the submission lifecycle: full re-validation, one transport
    /// call, then `Success` or `Failed`. While a submission is in flight
    /// further calls are no-ops.
    pub async fn submit(&mut self, transport: &dyn SubmissionTransport) -> FormState {
        if self.state == FormState::Submitting {
            return self.state;
        }

        self.errors = validate_form(&self.submission, &self.config.rules);
        if !self.errors.is_empty() {
            self.state = FormState::Editing;
            return self.state;
        }

        self.state = FormState::Submitting;
        self.status_message = None;

        let payload = self.payload();
        let result = transport.submit(self.config.endpoint, &payload).await;

        if result.success {
            if self.config.variant == FormVariant::Newsletter {
                if let Some(gate) = &self.newsletter_gate {
                    gate.mark_subscribed(self.submission.email.trim());
                }
            }
            self.submission.clear();
            self.errors.clear();
            self.state = FormState::Success;
            self.status_message =
                Some(result.message.unwrap_or_else(|| "Message sent!".to_string()));
            self.auto_reset_at = self.config.auto_reset.map(|delay| Instant::now() + delay);
        } else {
            // Entered values survive a failure; the user resubmits.
            self.state = FormState::Failed;
            self.status_message =
                Some(result.message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()));
        }

        self.state
    }

    fn payload(&self) -> Value {
        match self.config.variant {
            FormVariant::Newsletter => json!({ "email": self.submission.email.trim() }),
            _ => serde_json::to_value(&self.submission).unwrap_or_else(|_| json!({})),
        }
    }

    /// Drive the auto-reset deadline. The success acknowledgment survives
    /// until the configured delay has fully elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.state == FormState::Success {
            if let Some(deadline) = self.auto_reset_at {
                if now >= deadline {
                    self.state = FormState::Editing;
                    self.status_message = None;
                    self.auto_reset_at = None;
                }
            }
        }
    }

    pub fn dismiss_status(&mut self) {
        self.status_message = None;
        if self.state == FormState::Failed || self.state == FormState::Success {
            self.state = FormState::Editing;
        }
        self.auto_reset_at = None;
    }

    /// Full reset, e.g. when the containing UI closes. Cancels any pending
    /// auto-reset so a stale deadline can never touch a reopened form.
    pub fn reset(&mut self) {
        self.submission.clear();
        self.errors.clear();
        self.state = FormState::Editing;
        self.status_message = None;
        self.auto_reset_at = None;
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: FormState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::model::submission::SubmissionResult;

    struct StubTransport {
        result: SubmissionResult,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubTransport {
        fn new(result: SubmissionResult) -> Self {
            StubTransport { result, calls: Mutex::new(Vec::new()) }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubmissionTransport for StubTransport {
        async fn submit(&self, endpoint: &str, payload: &Value) -> SubmissionResult {
            self.calls.lock().unwrap().push((endpoint.to_string(), payload.clone()));
            self.result.clone()
        }
    }

    fn filled_booking_controller() -> FormController {
        let mut controller = FormController::new(FormConfig::booking());
        controller.set_field(fields::NAME, "Ana Torres");
        controller.set_field(fields::EMAIL, "ana@example.com");
        controller.set_field(fields::PHONE, "(555) 123-4567");
        controller.set_field(fields::MESSAGE, "Is the villa free in June?");
        controller
    }

    #[tokio::test]
    async fn test_invalid_form_never_hits_the_network() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = FormController::new(FormConfig::booking());

        let state = controller.submit(&transport).await;

        assert_eq!(state, FormState::Editing);
        assert_eq!(controller.errors().len(), 4);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_clears_fields() {
        let transport = StubTransport::new(SubmissionResult::ok("Thanks!"));
        let mut controller = filled_booking_controller();

        let state = controller.submit(&transport).await;

        assert_eq!(state, FormState::Success);
        assert_eq!(controller.submission(), &ContactSubmission::default());
        assert_eq!(controller.status_message(), Some("Thanks!"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_fields() {
        let transport = StubTransport::new(SubmissionResult::failure("db down"));
        let mut controller = filled_booking_controller();

        let state = controller.submit(&transport).await;

        assert_eq!(state, FormState::Failed);
        assert_eq!(controller.submission().name, "Ana Torres");
        assert_eq!(controller.submission().phone, "5551234567");
        assert_eq!(controller.status_message(), Some("db down"));
    }

    #[tokio::test]
    async fn test_editing_after_failure_clears_only_that_error() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = FormController::new(FormConfig::booking());
        controller.submit(&transport).await;
        assert_eq!(controller.errors().len(), 4);

        controller.set_field(fields::EMAIL, "ana@example.com");

        assert!(!controller.errors().contains_key(fields::EMAIL));
        assert!(controller.errors().contains_key(fields::NAME));
        assert!(controller.errors().contains_key(fields::PHONE));
        assert!(controller.errors().contains_key(fields::MESSAGE));
    }

    #[tokio::test]
    async fn test_edit_after_failure_returns_to_editing() {
        let transport = StubTransport::new(SubmissionResult::failure("nope"));
        let mut controller = filled_booking_controller();
        controller.submit(&transport).await;
        assert_eq!(controller.state(), FormState::Failed);

        controller.set_field(fields::MESSAGE, "Updated message");

        assert_eq!(controller.state(), FormState::Editing);
        assert!(controller.status_message().is_none());
    }

    #[tokio::test]
    async fn test_submit_guard_while_in_flight() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = filled_booking_controller();
        controller.force_state(FormState::Submitting);

        let state = controller.submit(&transport).await;

        assert_eq!(state, FormState::Submitting);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_auto_reset_after_delay() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = filled_booking_controller();
        controller.submit(&transport).await;
        assert_eq!(controller.state(), FormState::Success);

        let now = Instant::now();
        controller.tick(now);
        assert_eq!(controller.state(), FormState::Success);

        controller.tick(now + AUTO_RESET_DELAY + Duration::from_millis(1));
        assert_eq!(controller.state(), FormState::Editing);
        assert!(controller.status_message().is_none());
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_auto_reset() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = filled_booking_controller();
        controller.submit(&transport).await;
        controller.reset();

        controller.set_field(fields::NAME, "Ben");
        controller.tick(Instant::now() + AUTO_RESET_DELAY * 2);

        // A stale deadline must not wipe the reopened form.
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.submission().name, "Ben");
    }

    #[tokio::test]
    async fn test_newsletter_payload_is_email_only() {
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = FormController::new(FormConfig::newsletter());
        controller.set_field(fields::EMAIL, "ana@example.com");

        controller.submit(&transport).await;

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, endpoints::SUBSCRIBE);
        assert_eq!(calls[0].1, json!({ "email": "ana@example.com" }));
    }

    #[tokio::test]
    async fn test_newsletter_success_records_subscription_flag() {
        use crate::client::newsletter::NewsletterGate;
        use crate::util::flag_store::MemoryFlagStore;
        use std::sync::Arc;

        let store = Arc::new(MemoryFlagStore::new());
        let transport = StubTransport::new(SubmissionResult::ok("ok"));
        let mut controller = FormController::new(FormConfig::newsletter())
            .with_newsletter_gate(NewsletterGate::new(store.clone()));
        controller.set_field(fields::EMAIL, "ana@example.com");

        controller.submit(&transport).await;

        let gate = NewsletterGate::new(store);
        assert!(gate.has_subscribed("ana@example.com"));
        assert!(!gate.should_prompt());
    }

    #[test]
    fn test_date_range_formats_into_payload() {
        let mut controller = FormController::new(FormConfig::general());
        controller.set_date_range(
            NaiveDate::from_ymd_opt(2026, 6, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
        );
        assert_eq!(controller.submission().dates, "Jun 05, 2026 - Jun 12, 2026");

        controller.clear_date_range();
        assert!(controller.submission().dates.is_empty());
    }

    #[test]
    fn test_phone_sanitized_on_keystroke_for_booking() {
        let mut controller = FormController::new(FormConfig::booking());
        controller.set_field(fields::PHONE, "(555) 123-4567 ext 9");
        // Digits only, truncated to the expected length.
        assert_eq!(controller.submission().phone, "5551234567");
    }
}
