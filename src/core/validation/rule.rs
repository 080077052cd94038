//! Declarative validation rules
//!
//! A [`ValidationRule`] is the set of checks configured for one field. Every
//! check is optional: an absent check is skipped entirely. Rules are grouped
//! per form in a [`ValidationRuleSet`], built once and never mutated while a
//! form is live.

use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A regular expression that must match the whole value
///
/// The source must compile on its own; it is then wrapped as `^(?:source)$`,
/// so a match is always a full match regardless of how the source was written.
#[derive(Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a full-match pattern from a regex source
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        // a source with an unbalanced `)` would otherwise close the wrapping group
        Regex::new(source)?;
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written by the caller (without the anchors)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `value` matches the pattern in full
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldPattern").field(&self.source).finish()
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

type CustomFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Escape hatch for domain rules that do not fit the declarative checks
///
/// The function receives the raw value and returns an error message, or
/// `None` when the value is acceptable.
#[derive(Clone)]
pub struct CustomValidator {
    name: String,
    check: Arc<CustomFn>,
}

impl CustomValidator {
    /// Wrap a closure as a named custom validator
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Name used in logs and configuration
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check
    pub fn call(&self, value: &str) -> Option<String> {
        (self.check)(value)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValidator").field(&self.name).finish()
    }
}

/// Per-field declarative constraint set
///
/// Checks run in a fixed order and the first failure wins:
/// `required` → `email` → `pattern` → `min_length` → `max_length` → `custom`.
///
/// # Example
///
/// ```
/// use onboard::core::validation::{ValidationRule, validate_field};
///
/// let rule = ValidationRule::new().required().email();
/// assert_eq!(
///     validate_field("not-an-email", &rule).as_deref(),
///     Some("Please enter a valid email address")
/// );
/// assert_eq!(validate_field("user@example.com", &rule), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub email: bool,
    pub pattern: Option<FieldPattern>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub custom: Option<CustomValidator>,
    /// Replaces the default "is required" message
    pub message: Option<String>,
    /// Replaces the default pattern mismatch message
    pub pattern_message: Option<String>,
}

impl ValidationRule {
    /// An empty rule: every value passes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn pattern(mut self, pattern: FieldPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn custom(mut self, validator: CustomValidator) -> Self {
        self.custom = Some(validator);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }
}

/// Mapping from field name to its rule for one form
///
/// Only fields present here are ever validated or reported.
#[derive(Debug, Clone, Default)]
pub struct ValidationRuleSet {
    rules: IndexMap<String, ValidationRule>,
}

impl ValidationRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: ValidationRule) {
        self.rules.insert(name.into(), rule);
    }

    pub fn get(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    /// Field names in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ValidationRule)> for ValidationRuleSet {
    fn from_iter<I: IntoIterator<Item = (K, ValidationRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
