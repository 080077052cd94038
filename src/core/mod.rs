//! Core module: validation engine, form controller and shared types

pub mod error;
pub mod events;
pub mod field;
pub mod form;
pub mod label;
pub mod macros;
pub mod validation;

pub use error::{ConfigError, OnboardError, OnboardResult, SubmissionError, ValidationError};
pub use events::{EventBus, EventEnvelope, FlowEvent, FormEvent, OnboardEvent};
pub use field::{FieldProps, FormValues, InputEvent};
pub use form::FormController;
pub use label::Labeler;
pub use validation::{
    FieldErrors, FormValidation, ValidationRule, ValidationRuleSet, validate_field, validate_form,
};
