//! Declarative field validation
//!
//! Rules describe what a field must satisfy ([`ValidationRule`]), rule sets
//! group them per form ([`ValidationRuleSet`]), and the engine turns a form's
//! values into a map of per-field error messages ([`FormValidation`]).
//! Failures are data, never `Err`.

pub mod engine;
pub mod rule;
pub mod validators;

pub use engine::{
    FieldErrors, FormValidation, is_valid_field, validate_field, validate_form,
    validate_named_field,
};
pub use rule::{CustomValidator, FieldPattern, ValidationRule, ValidationRuleSet};
pub use validators::DigitRange;
