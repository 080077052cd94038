//! Rule configuration loading
//!
//! Rule sets can be described in YAML instead of code:
//!
//! ```yaml
//! forms:
//!   personalInfo:
//!     firstName:
//!       required: true
//!       minLength: 2
//!       custom: personName
//!     countryCode:
//!       required: true
//!       message: Please select a country code
//! ```
//!
//! `pattern` is a regex source matched against the whole value and `custom`
//! names one of the registered validators (see [`custom_validator`]).

use crate::core::error::{ConfigError, OnboardResult};
use crate::core::validation::validators::{business_name, contact_number, person_name};
use crate::core::validation::{CustomValidator, FieldPattern, ValidationRule, ValidationRuleSet};
use crate::onboarding::data::Section;
use crate::onboarding::rules::rules_for;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One field's rule as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub email: bool,

    /// Regex source, matched against the whole value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Name of a registered custom validator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,

    /// Replaces the default "is required" message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Replaces the default pattern mismatch message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

impl RuleConfig {
    /// Build the runtime rule; `field` is only used for error reporting
    pub fn to_rule(&self, field: &str) -> OnboardResult<ValidationRule> {
        let pattern = match &self.pattern {
            Some(source) => Some(FieldPattern::new(source).map_err(|e| {
                ConfigError::InvalidPattern {
                    field: field.to_string(),
                    pattern: source.clone(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        let custom = match &self.custom {
            Some(name) => Some(custom_validator(name).ok_or_else(|| {
                ConfigError::UnknownValidator {
                    field: field.to_string(),
                    name: name.clone(),
                }
            })?),
            None => None,
        };

        Ok(ValidationRule {
            required: self.required,
            email: self.email,
            pattern,
            min_length: self.min_length,
            max_length: self.max_length,
            custom,
            message: self.message.clone(),
            pattern_message: self.pattern_message.clone(),
        })
    }
}

impl From<&ValidationRule> for RuleConfig {
    fn from(rule: &ValidationRule) -> Self {
        Self {
            required: rule.required,
            email: rule.email,
            pattern: rule.pattern.as_ref().map(|p| p.source().to_string()),
            min_length: rule.min_length,
            max_length: rule.max_length,
            custom: rule.custom.as_ref().map(|c| c.name().to_string()),
            message: rule.message.clone(),
            pattern_message: rule.pattern_message.clone(),
        }
    }
}

/// Custom validator registered under `name`
///
/// Known names: `contactNumber`, `businessName`, `personName`.
pub fn custom_validator(name: &str) -> Option<CustomValidator> {
    match name {
        "contactNumber" => Some(contact_number()),
        "businessName" => Some(business_name()),
        "personName" => Some(person_name()),
        _ => None,
    }
}

/// Rule sets for any number of forms, keyed by form name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub forms: IndexMap<String, IndexMap<String, RuleConfig>>,
}

impl FormsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> OnboardResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "forms config loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> OnboardResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn form_names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// Build the rule set of one form
    ///
    /// Fails on an unknown form, a pattern that does not compile, or an
    /// unregistered custom validator.
    pub fn rule_set(&self, form: &str) -> OnboardResult<ValidationRuleSet> {
        let fields = self.forms.get(form).ok_or_else(|| ConfigError::UnknownForm {
            form: form.to_string(),
        })?;

        let mut rules = ValidationRuleSet::new();
        for (field, config) in fields {
            rules.insert(field.as_str(), config.to_rule(field)?);
        }
        Ok(rules)
    }

    /// Combine several configurations
    ///
    /// A form defined in more than one config takes the definition from the
    /// last one; forms keep the position of their first appearance.
    pub fn merge(configs: Vec<FormsConfig>) -> Self {
        let mut forms = IndexMap::new();
        for config in configs {
            for (name, fields) in config.forms {
                if forms.contains_key(&name) {
                    tracing::debug!(form = %name, "form redefined by a later config");
                }
                forms.insert(name, fields);
            }
        }
        Self { forms }
    }

    /// The built-in onboarding forms, keyed by section name
    pub fn default_config() -> Self {
        let forms = Section::ALL
            .into_iter()
            .filter_map(|section| {
                let rules = rules_for(section)?;
                let fields: IndexMap<String, RuleConfig> = rules
                    .iter()
                    .map(|(field, rule)| (field.to_string(), RuleConfig::from(rule)))
                    .collect();
                Some((section.key().to_string(), fields))
            })
            .collect();
        Self { forms }
    }
}
