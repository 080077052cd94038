//! Reusable field validators
//!
//! Each primitive takes the value, its constraint and an optional message
//! override, and returns the error message or `None`. Apart from
//! [`required`], primitives accept a blank value (empty or whitespace only):
//! emptiness is the business of the `required` check alone.

use super::rule::{CustomValidator, FieldPattern};
use std::sync::OnceLock;

/// Subject used in default messages when the field name is unknown
pub(crate) const GENERIC_SUBJECT: &str = "This field";

/// Fixed text of the email check
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

// =============================================================================
// Built-in patterns
// =============================================================================

fn builtin(cell: &'static OnceLock<FieldPattern>, source: &str) -> &'static FieldPattern {
    cell.get_or_init(|| FieldPattern::new(source).expect("built-in pattern compiles"))
}

/// `local@domain.tld`: no whitespace anywhere, no `@` outside the separator
pub fn email_pattern() -> &'static FieldPattern {
    static EMAIL: OnceLock<FieldPattern> = OnceLock::new();
    builtin(&EMAIL, r"(?i)[^[:space:]@]+@[^[:space:]@]+\.[^[:space:]]+")
}

/// 3 to 10 letters, digits, spaces or hyphens
pub fn postal_code_pattern() -> &'static FieldPattern {
    static POSTAL_CODE: OnceLock<FieldPattern> = OnceLock::new();
    builtin(&POSTAL_CODE, r"(?i)[a-z0-9 \-]{3,10}")
}

/// `http://` or `https://` followed by at least one character
pub fn url_pattern() -> &'static FieldPattern {
    static URL: OnceLock<FieldPattern> = OnceLock::new();
    builtin(&URL, r"https?://.+")
}

/// 24-hour `HH:MM`, the leading zero of the hour is optional
pub fn time_pattern() -> &'static FieldPattern {
    static TIME: OnceLock<FieldPattern> = OnceLock::new();
    builtin(&TIME, r"([01]?[0-9]|2[0-3]):[0-5][0-9]")
}

// =============================================================================
// Default messages
// =============================================================================

pub(crate) fn required_message(subject: &str) -> String {
    format!("{} is required", subject)
}

pub(crate) fn pattern_message(subject: &str) -> String {
    format!("{} has an invalid format", subject)
}

pub(crate) fn min_length_message(subject: &str, min: usize) -> String {
    format!("{} must be at least {} characters", subject, min)
}

pub(crate) fn max_length_message(subject: &str, max: usize) -> String {
    format!("{} must not exceed {} characters", subject, max)
}

fn or_default(message: Option<&str>, default: impl FnOnce() -> String) -> String {
    message.map(str::to_string).unwrap_or_else(default)
}

/// Empty or whitespace only; every check but `required` lets these through
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length in characters, not bytes
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

// =============================================================================
// Primitives
// =============================================================================

/// Value must be non-empty after trimming
pub fn required(value: &str, message: Option<&str>) -> Option<String> {
    if is_blank(value) {
        Some(or_default(message, || required_message(GENERIC_SUBJECT)))
    } else {
        None
    }
}

/// Value must have at least `min` characters
pub fn min_length(value: &str, min: usize, message: Option<&str>) -> Option<String> {
    if !is_blank(value) && char_len(value) < min {
        Some(or_default(message, || min_length_message(GENERIC_SUBJECT, min)))
    } else {
        None
    }
}

/// Value must have at most `max` characters
pub fn max_length(value: &str, max: usize, message: Option<&str>) -> Option<String> {
    if !is_blank(value) && char_len(value) > max {
        Some(or_default(message, || max_length_message(GENERIC_SUBJECT, max)))
    } else {
        None
    }
}

/// Value must fully match `pattern`
pub fn pattern(value: &str, pattern: &FieldPattern, message: Option<&str>) -> Option<String> {
    if !is_blank(value) && !pattern.is_match(value) {
        Some(or_default(message, || pattern_message(GENERIC_SUBJECT)))
    } else {
        None
    }
}

/// Value must look like an email address
pub fn email(value: &str, message: Option<&str>) -> Option<String> {
    if !is_blank(value) && !email_pattern().is_match(value) {
        Some(or_default(message, || EMAIL_MESSAGE.to_string()))
    } else {
        None
    }
}

/// Value must start with `http://` or `https://`
pub fn url(value: &str, message: Option<&str>) -> Option<String> {
    if !is_blank(value) && !url_pattern().is_match(value) {
        Some(or_default(message, || {
            "Please enter a valid URL starting with http:// or https://".to_string()
        }))
    } else {
        None
    }
}

/// Bounds on the number of digits in a phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitRange {
    pub min: usize,
    pub max: usize,
}

impl DigitRange {
    /// Local contact numbers: 7 to 10 digits
    pub const CONTACT_NUMBER: DigitRange = DigitRange { min: 7, max: 10 };
}

impl Default for DigitRange {
    fn default() -> Self {
        Self::CONTACT_NUMBER
    }
}

/// Phone number digit count must fall inside `digits`
///
/// Every non-digit character (spaces, `+`, dashes, parentheses) is stripped
/// before counting. Length-valid numbers made only of zeros or only of ones
/// are rejected as well. A `message` override replaces all four messages.
pub fn phone(value: &str, digits: DigitRange, message: Option<&str>) -> Option<String> {
    if is_blank(value) {
        return None;
    }

    let stripped: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let count = stripped.len();

    let failure = if count < digits.min {
        format!("Phone number must contain at least {} digits", digits.min)
    } else if count > digits.max {
        format!("Phone number cannot exceed {} digits", digits.max)
    } else if stripped.chars().all(|c| c == '0') {
        "Phone number cannot be all zeros".to_string()
    } else if stripped.chars().all(|c| c == '1') {
        "Phone number cannot be all ones".to_string()
    } else {
        return None;
    };

    Some(or_default(message, || failure))
}

// =============================================================================
// Domain custom validators
// =============================================================================

/// Contact numbers used across the onboarding forms (7 to 10 digits)
pub fn contact_number() -> CustomValidator {
    CustomValidator::new("contactNumber", |value| {
        phone(value, DigitRange::CONTACT_NUMBER, None)
    })
}

/// Business names: letters, digits, spaces and `& ' . , ( ) -`
pub fn business_name() -> CustomValidator {
    static BUSINESS_NAME: OnceLock<FieldPattern> = OnceLock::new();
    let allowed = builtin(&BUSINESS_NAME, r"[\p{L}0-9 &'.,()\-]+");
    CustomValidator::new("businessName", move |value| {
        (!is_blank(value) && !allowed.is_match(value)).then(|| {
            "Business name can only contain letters, numbers, spaces and & ' . , ( ) -"
                .to_string()
        })
    })
}

/// Person names: letters, spaces and `' . -`
pub fn person_name() -> CustomValidator {
    static PERSON_NAME: OnceLock<FieldPattern> = OnceLock::new();
    let allowed = builtin(&PERSON_NAME, r"[\p{L} '.\-]+");
    CustomValidator::new("personName", move |value| {
        (!is_blank(value) && !allowed.is_match(value))
            .then(|| "Name can only contain letters, spaces, apostrophes, periods and hyphens".to_string())
    })
}
