//! Change notifications for forms and the onboarding flow
//!
//! Every mutation of a form controller or of the flow controller is published
//! on an [`EventBus`]. The UI layer subscribes and re-renders the bound
//! controls; tests subscribe to assert what happened.
//!
//! # Architecture
//!
//! ```text
//! FormController ──┐
//!                  ├──▶ EventBus::publish() ──▶ broadcast channel ──▶ UI subscribers
//! OnboardingFlow ──┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.publish("personalInfo", OnboardEvent::Form(FormEvent::Reset));
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} -> {}", envelope.source, envelope.event.action());
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events emitted by a form controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormEvent {
    /// A control changed a field's value
    FieldChanged { field: String, value: String },
    /// A field lost focus and was validated (when it has a rule)
    FieldBlurred {
        field: String,
        error: Option<String>,
    },
    /// The whole form was validated
    Validated { is_valid: bool, error_count: usize },
    /// Values were merged in programmatically
    Prefilled { fields: Vec<String> },
    /// The form went back to its initial values
    Reset,
}

/// Events emitted by the onboarding flow controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlowEvent {
    /// The current step moved
    StepChanged { from: u8, to: u8 },
    /// A jump to an unknown step was ignored
    TransitionIgnored { requested: i64 },
    /// Partial data was merged into a section
    SectionUpdated { section: String },
    /// A section update was discarded
    UpdateIgnored { section: String, reason: String },
    /// The wizard went back to step 1 with blank data
    Reset,
}

/// Top-level event wrapping form and flow events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnboardEvent {
    Form(FormEvent),
    Flow(FlowEvent),
}

impl OnboardEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            OnboardEvent::Form(_) => "form",
            OnboardEvent::Flow(_) => "flow",
        }
    }

    /// Field this event relates to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            OnboardEvent::Form(
                FormEvent::FieldChanged { field, .. } | FormEvent::FieldBlurred { field, .. },
            ) => Some(field),
            _ => None,
        }
    }

    /// Action name, matching the serialized `action` tag
    pub fn action(&self) -> &str {
        match self {
            OnboardEvent::Form(e) => match e {
                FormEvent::FieldChanged { .. } => "field_changed",
                FormEvent::FieldBlurred { .. } => "field_blurred",
                FormEvent::Validated { .. } => "validated",
                FormEvent::Prefilled { .. } => "prefilled",
                FormEvent::Reset => "reset",
            },
            OnboardEvent::Flow(e) => match e {
                FlowEvent::StepChanged { .. } => "step_changed",
                FlowEvent::TransitionIgnored { .. } => "transition_ignored",
                FlowEvent::SectionUpdated { .. } => "section_updated",
                FlowEvent::UpdateIgnored { .. } => "update_ignored",
                FlowEvent::Reset => "reset",
            },
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Form name or flow session that emitted the event
    pub source: String,
    /// The actual event
    pub event: OnboardEvent,
}

impl EventEnvelope {
    pub fn new(source: impl Into<String>, event: OnboardEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; clones share the same channel, so several controllers can
/// publish on one bus.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers that fall more than `capacity` events behind get
    /// `Lagged` on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will get the event.
    pub fn publish(&self, source: impl Into<String>, event: OnboardEvent) -> usize {
        let envelope = EventEnvelope::new(source, event);
        // send() returns Err only if there are no receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_event_serialization() {
        let event = OnboardEvent::Form(FormEvent::FieldBlurred {
            field: "email".to_string(),
            error: Some("Please enter a valid email address".to_string()),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "form");
        assert_eq!(json["action"], "field_blurred");
        assert_eq!(json["field"], "email");
    }

    #[test]
    fn test_flow_event_accessors() {
        let event = OnboardEvent::Flow(FlowEvent::StepChanged { from: 2, to: 3 });
        assert_eq!(event.event_kind(), "flow");
        assert_eq!(event.action(), "step_changed");
        assert_eq!(event.field(), None);

        let event = OnboardEvent::Form(FormEvent::FieldChanged {
            field: "city".to_string(),
            value: "Kandy".to_string(),
        });
        assert_eq!(event.field(), Some("city"));
    }

    #[test]
    fn test_action_matches_serialized_tag() {
        let events = vec![
            OnboardEvent::Form(FormEvent::Validated {
                is_valid: false,
                error_count: 2,
            }),
            OnboardEvent::Form(FormEvent::Prefilled { fields: vec![] }),
            OnboardEvent::Flow(FlowEvent::TransitionIgnored { requested: 99 }),
            OnboardEvent::Flow(FlowEvent::Reset),
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["action"], event.action());
        }
    }

    #[test]
    fn test_event_envelope_has_metadata() {
        let envelope = EventEnvelope::new("address", OnboardEvent::Form(FormEvent::Reset));
        assert!(!envelope.id.is_nil());
        assert!(envelope.timestamp <= Utc::now());
        assert_eq!(envelope.source, "address");
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let receivers = bus.publish(
            "session",
            OnboardEvent::Flow(FlowEvent::StepChanged { from: 1, to: 2 }),
        );
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.source, "session");
        assert_eq!(
            received.event,
            OnboardEvent::Flow(FlowEvent::StepChanged { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish("x", OnboardEvent::Flow(FlowEvent::Reset)), 0);
    }

    #[test]
    fn test_event_bus_clone_shares_channel() {
        let bus = EventBus::default();
        let _rx = bus.subscribe();

        let bus2 = bus.clone();
        assert_eq!(bus2.receiver_count(), 1);
    }
}
