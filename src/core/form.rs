//! Form-state controller
//!
//! [`FormController`] owns one form's live values, active errors and touched
//! flags, and exposes the handlers input controls are bound to. Validation is
//! driven on blur (one field) and on submit ([`FormController::validate`],
//! every ruled field).
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use onboard::core::field::InputEvent;
//! use onboard::core::form::FormController;
//! use onboard::core::validation::{ValidationRule, ValidationRuleSet};
//!
//! let rules = ValidationRuleSet::new()
//!     .field("email", ValidationRule::new().required().email());
//! let mut form = FormController::new("signup", IndexMap::<String, String>::new(), rules);
//!
//! form.handle_input_change("email", &InputEvent::new("nope"));
//! form.handle_blur("email");
//! assert_eq!(form.error("email"), Some("Please enter a valid email address"));
//!
//! form.handle_input_change("email", &InputEvent::new("me@example.com"));
//! assert_eq!(form.error("email"), None);
//! assert!(form.validate());
//! ```

use crate::core::events::{EventBus, EventEnvelope, FormEvent, OnboardEvent};
use crate::core::field::{FieldProps, FormValues, InputEvent};
use crate::core::validation::{FieldErrors, ValidationRuleSet, validate_form, validate_named_field};
use indexmap::IndexMap;
use tokio::sync::broadcast;

/// Live state of one form instance
#[derive(Debug, Clone)]
pub struct FormController<T: FormValues> {
    name: String,
    initial: T,
    values: T,
    errors: FieldErrors,
    touched: IndexMap<String, bool>,
    rules: ValidationRuleSet,
    events: EventBus,
}

impl<T: FormValues> FormController<T> {
    /// Create a controller; `initial` is kept as the reset snapshot
    pub fn new(name: impl Into<String>, initial: T, rules: ValidationRuleSet) -> Self {
        Self {
            name: name.into(),
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            touched: IndexMap::new(),
            rules,
            events: EventBus::default(),
        }
    }

    /// Publish on a shared bus instead of the controller's own
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn into_values(self) -> T {
        self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn touched(&self) -> &IndexMap<String, bool> {
        &self.touched
    }

    pub fn rules(&self) -> &ValidationRuleSet {
        &self.rules
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.field_or_empty(field)
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.get(field).copied().unwrap_or(false)
    }

    /// Whether any ruled field differs from the initial snapshot
    pub fn is_dirty(&self) -> bool {
        self.rules
            .fields()
            .any(|f| self.values.field(f) != self.initial.field(f))
    }

    /// Subscribe to this controller's change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Text input changed
    ///
    /// Stores the new value and clears an existing error on that field without
    /// re-validating; the next blur or submit decides again.
    pub fn handle_input_change(&mut self, field: &str, event: &InputEvent) {
        self.change(field, event.value().to_string());
    }

    /// Option control (dropdown, radio group) changed
    pub fn handle_select_change(&mut self, field: &str, value: impl Into<String>) {
        self.change(field, value.into());
    }

    fn change(&mut self, field: &str, value: String) {
        if !self.values.set_field(field, value.clone()) {
            tracing::debug!(form = %self.name, field = %field, "change for unknown field ignored");
            return;
        }
        self.errors.shift_remove(field);
        self.publish(FormEvent::FieldChanged {
            field: field.to_string(),
            value,
        });
    }

    /// Field lost focus
    ///
    /// Marks the field touched and, when it has a rule, validates it and
    /// records or clears its error.
    pub fn handle_blur(&mut self, field: &str) {
        self.touched.insert(field.to_string(), true);

        let Some(rule) = self.rules.get(field) else {
            return;
        };

        let error = validate_named_field(field, self.values.field_or_empty(field), rule);
        tracing::debug!(form = %self.name, field = %field, error = ?error, "field blurred");

        match &error {
            Some(message) => {
                self.errors.insert(field.to_string(), message.clone());
            }
            None => {
                self.errors.shift_remove(field);
            }
        }
        self.publish(FormEvent::FieldBlurred {
            field: field.to_string(),
            error,
        });
    }

    /// Validate every ruled field before submit
    ///
    /// Replaces the whole error map, marks every ruled field touched so all
    /// outstanding errors show, and returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let result = validate_form(&self.values, &self.rules);

        for field in self.rules.fields() {
            self.touched.insert(field.to_string(), true);
        }
        self.errors = result.errors;

        tracing::debug!(
            form = %self.name,
            is_valid = result.is_valid,
            error_count = self.errors.len(),
            "form validated"
        );
        self.publish(FormEvent::Validated {
            is_valid: result.is_valid,
            error_count: self.errors.len(),
        });
        result.is_valid
    }

    /// Back to the initial snapshot with no errors and nothing touched
    pub fn reset_form(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.publish(FormEvent::Reset);
    }

    /// Merge values in programmatically (prefill)
    ///
    /// Errors and touched flags are left alone. Fields the form does not have
    /// are skipped.
    pub fn update_form_data<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut applied = Vec::new();
        for (field, value) in partial {
            let field = field.as_ref();
            if self.values.set_field(field, value.into()) {
                applied.push(field.to_string());
            } else {
                tracing::debug!(form = %self.name, field = %field, "prefill for unknown field skipped");
            }
        }
        self.publish(FormEvent::Prefilled { fields: applied });
    }

    /// Value, displayable error and invalid flag for one control
    ///
    /// An error is only surfaced once the field has been touched.
    pub fn field_props(&self, field: &str) -> FieldProps {
        let error = if self.is_touched(field) {
            self.error(field).map(str::to_string)
        } else {
            None
        };
        FieldProps {
            value: self.value(field).to_string(),
            invalid: error.is_some(),
            error,
        }
    }

    fn publish(&self, event: FormEvent) {
        self.events.publish(self.name.clone(), OnboardEvent::Form(event));
    }
}
