//! String-keyed access to form values
//!
//! Forms hold their values either in a plain map or in a typed section
//! struct. [`FormValues`] is the common surface the validation engine and the
//! form controller work through.

use indexmap::IndexMap;
use std::collections::HashMap;

/// A set of named string fields
pub trait FormValues: Clone {
    /// Current value of `name`, `None` when the form has no such field
    fn field(&self, name: &str) -> Option<&str>;

    /// Overwrite `name`; returns `false` when the form has no such field
    fn set_field(&mut self, name: &str, value: String) -> bool;

    /// Value of `name`, treating an unknown field as empty
    fn field_or_empty(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }
}

impl FormValues for IndexMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        self.insert(name.to_string(), value);
        true
    }
}

impl FormValues for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        self.insert(name.to_string(), value);
        true
    }
}

/// Text change coming from an input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    value: String,
}

impl InputEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The control's text after the change
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

/// What an input or select control needs to render itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProps {
    pub value: String,
    /// Error to display, only once the field has been touched
    pub error: Option<String>,
    /// Drives the control's invalid styling
    pub invalid: bool,
}
