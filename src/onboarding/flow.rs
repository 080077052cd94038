//! Onboarding flow controller
//!
//! [`OnboardingFlow`] tracks which of the five steps is showing and holds the
//! data collected so far. Every transition is guarded so the current step
//! never leaves 1..=5; invalid requests are ignored, logged at debug level
//! and published as events rather than returned as errors.

use super::data::{OnboardingFormData, Section};
use super::rules::validate_section;
use super::step::OnboardingStep;
use crate::core::events::{EventBus, EventEnvelope, FlowEvent, OnboardEvent};
use crate::core::validation::FormValidation;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

/// One merchant's pass through the wizard
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    session_id: Uuid,
    current_step: OnboardingStep,
    form_data: OnboardingFormData,
    events: EventBus,
}

impl OnboardingFlow {
    /// Fresh session on step 1 with default data
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            current_step: OnboardingStep::FIRST,
            form_data: OnboardingFormData::default(),
            events: EventBus::default(),
        }
    }

    /// Publish on a shared bus instead of the flow's own
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub fn form_data(&self) -> &OnboardingFormData {
        &self.form_data
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == OnboardingStep::FIRST
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == OnboardingStep::LAST
    }

    /// Completed fraction, `0.2` on step 1 up to `1.0` on step 5
    pub fn progress(&self) -> f32 {
        f32::from(self.current_step.number()) / f32::from(OnboardingStep::LAST.number())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Advance one step; stays put on the last step
    pub fn go_to_next_step(&mut self) {
        self.move_to(self.current_step.next());
    }

    /// Go back one step; stays put on the first step
    pub fn go_to_previous_step(&mut self) {
        self.move_to(self.current_step.previous());
    }

    /// Jump to step `n` if it is one of 1..=5, otherwise do nothing
    pub fn go_to_step(&mut self, n: i64) {
        match OnboardingStep::from_number(n) {
            Some(step) => self.move_to(step),
            None => {
                tracing::debug!(session = %self.session_id, requested = n, "step out of range ignored");
                self.publish(FlowEvent::TransitionIgnored { requested: n });
            }
        }
    }

    pub fn go_to(&mut self, step: OnboardingStep) {
        self.move_to(step);
    }

    fn move_to(&mut self, step: OnboardingStep) {
        if step == self.current_step {
            return;
        }
        let from = self.current_step;
        self.current_step = step;
        tracing::debug!(session = %self.session_id, from = from.number(), to = step.number(), "step changed");
        self.publish(FlowEvent::StepChanged {
            from: from.number(),
            to: step.number(),
        });
    }

    /// Shallow-merge `partial` into one section
    ///
    /// Only JSON objects are merged. Anything else, or an object whose values
    /// do not fit the section (a number where text is expected), leaves the
    /// data unchanged. Sibling sections are never touched. Returns whether the
    /// merge was applied.
    pub fn update_form_data(&mut self, section: Section, partial: Value) -> bool {
        let Value::Object(fields) = partial else {
            tracing::debug!(session = %self.session_id, section = %section, "non-object update ignored");
            self.publish(FlowEvent::UpdateIgnored {
                section: section.key().to_string(),
                reason: "not an object".to_string(),
            });
            return false;
        };

        match self.form_data.merge_section(section, &fields) {
            Ok(()) => {
                tracing::debug!(
                    session = %self.session_id,
                    section = %section,
                    keys = fields.len(),
                    "section updated"
                );
                self.publish(FlowEvent::SectionUpdated {
                    section: section.key().to_string(),
                });
                true
            }
            Err(e) => {
                tracing::warn!(session = %self.session_id, section = %section, error = %e, "update discarded");
                self.publish(FlowEvent::UpdateIgnored {
                    section: section.key().to_string(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// [`update_form_data`](Self::update_form_data) addressed by the section's
    /// JSON key; unknown keys are ignored
    pub fn update_section_by_key(&mut self, key: &str, partial: Value) -> bool {
        match Section::from_key(key) {
            Some(section) => self.update_form_data(section, partial),
            None => {
                tracing::debug!(session = %self.session_id, section = %key, "unknown section ignored");
                self.publish(FlowEvent::UpdateIgnored {
                    section: key.to_string(),
                    reason: "unknown section".to_string(),
                });
                false
            }
        }
    }

    /// Back to step 1 with the default data; the session id is kept
    pub fn reset_form(&mut self) {
        self.current_step = OnboardingStep::FIRST;
        self.form_data = OnboardingFormData::default();
        tracing::debug!(session = %self.session_id, "flow reset");
        self.publish(FlowEvent::Reset);
    }

    /// Validate the section collected on the current step
    pub fn validate_current_step(&self) -> FormValidation {
        validate_section(&self.form_data, self.current_step.section())
    }

    fn publish(&self, event: FlowEvent) {
        self.events
            .publish(self.session_id.to_string(), OnboardEvent::Flow(event));
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
