//! Rule interpreter
//!
//! Evaluates a [`ValidationRule`] against one value, or a whole
//! [`ValidationRuleSet`] against a form.

use super::rule::{ValidationRule, ValidationRuleSet};
use super::validators::{
    self, GENERIC_SUBJECT, max_length_message, min_length_message, pattern_message,
    required_message,
};
use crate::core::field::FormValues;
use crate::core::label::Labeler;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Active errors keyed by field name; fields without an error are absent
pub type FieldErrors = IndexMap<String, String>;

/// Outcome of validating a whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl FormValidation {
    pub fn from_errors(errors: FieldErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a single value against a rule
///
/// Returns the first failing check's message in the order
/// required → email → pattern → min length → max length → custom.
/// An empty value on a non-required rule is always valid.
pub fn validate_field(value: &str, rule: &ValidationRule) -> Option<String> {
    evaluate(GENERIC_SUBJECT, value, rule)
}

/// Same as [`validate_field`], with default messages naming the field
///
/// ```
/// use onboard::core::validation::{ValidationRule, validate_named_field};
///
/// let rule = ValidationRule::new().required();
/// assert_eq!(
///     validate_named_field("businessName", "", &rule).as_deref(),
///     Some("Business name is required")
/// );
/// ```
pub fn validate_named_field(field: &str, value: &str, rule: &ValidationRule) -> Option<String> {
    evaluate(&Labeler::humanize(field), value, rule)
}

fn evaluate(subject: &str, value: &str, rule: &ValidationRule) -> Option<String> {
    if validators::is_blank(value) {
        if !rule.required {
            return None;
        }
        let message = rule.message.clone().unwrap_or_else(|| required_message(subject));
        return validators::required(value, Some(&message));
    }

    let checks = [
        rule.email.then(|| validators::email(value, None)).flatten(),
        rule.pattern.as_ref().and_then(|p| {
            let message = rule.pattern_message.clone().unwrap_or_else(|| pattern_message(subject));
            validators::pattern(value, p, Some(&message))
        }),
        rule.min_length.and_then(|min| {
            validators::min_length(value, min, Some(&min_length_message(subject, min)))
        }),
        rule.max_length.and_then(|max| {
            validators::max_length(value, max, Some(&max_length_message(subject, max)))
        }),
    ];

    checks
        .into_iter()
        .flatten()
        .next()
        .or_else(|| rule.custom.as_ref().and_then(|custom| custom.call(value)))
}

/// Validate every field named in `rules`
///
/// Fields of `values` without a rule are ignored; a ruled field missing from
/// `values` is validated as the empty string.
pub fn validate_form<V: FormValues>(values: &V, rules: &ValidationRuleSet) -> FormValidation {
    let errors: FieldErrors = rules
        .iter()
        .filter_map(|(field, rule)| {
            validate_named_field(field, values.field_or_empty(field), rule)
                .map(|message| (field.to_string(), message))
        })
        .collect();

    FormValidation::from_errors(errors)
}

/// Convenience check used by callers that only need the flag
pub fn is_valid_field(value: &str, rule: &ValidationRule) -> bool {
    validate_field(value, rule).is_none()
}
