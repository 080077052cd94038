//! Typed error handling for the onboarding engine
//!
//! Validation failures are plain data ([`FieldErrors`](crate::core::validation::FieldErrors))
//! and flow misuse is absorbed as a no-op, so this hierarchy only covers the
//! surfaces that can genuinely fail: loading rule configuration and handing
//! validated data to a submission service.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: Errors related to rule configuration parsing
//! - [`ValidationError`]: Field errors lifted into a `Result` for callers that want `?`
//! - [`SubmissionError`]: Errors raised by or around the submission service
//!
//! # Example
//!
//! ```rust,ignore
//! use onboard::prelude::*;
//!
//! let config = FormsConfig::from_yaml_file("forms.yaml")?;
//! match config.rule_set("personalInfo") {
//!     Ok(rules) => println!("{} rules", rules.len()),
//!     Err(OnboardError::Config(ConfigError::UnknownForm { form })) => {
//!         eprintln!("no form named {}", form);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::validation::FieldErrors;
use serde::Serialize;
use thiserror::Error;

/// The main error type for the onboarding engine
#[derive(Debug, Error)]
pub enum OnboardError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submission service errors
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable error payload handed to the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OnboardError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OnboardError::Config(e) => e.error_code(),
            OnboardError::Validation(_) => "VALIDATION_ERROR",
            OnboardError::Submission(e) => e.error_code(),
            OnboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OnboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            OnboardError::Submission(SubmissionError::Rejected { step, message }) => {
                Some(serde_json::json!({ "step": step, "message": message }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to rule configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", describe_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },

    /// A rule carries a pattern that does not compile
    #[error("Invalid pattern '{pattern}' for field '{field}': {message}")]
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },

    /// A rule references a custom validator that is not registered
    #[error("Unknown custom validator '{name}' for field '{field}'")]
    UnknownValidator { field: String, name: String },

    /// No form with that name is configured
    #[error("Unknown form: {form}")]
    UnknownForm { form: String },
}

fn describe_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
            ConfigError::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN",
            ConfigError::UnknownValidator { .. } => "CONFIG_UNKNOWN_VALIDATOR",
            ConfigError::UnknownForm { .. } => "CONFIG_UNKNOWN_FORM",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field errors lifted into an error value
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field validation errors, keyed by field
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(FieldErrors),
}

fn join_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Lift a non-empty error map into an error, `Ok` when it is empty
    pub fn check(errors: FieldErrors) -> Result<(), ValidationError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Errors raised around the submission service
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The service answered `success: false`
    #[error("Step {step} was rejected: {message}")]
    Rejected { step: u8, message: String },

    /// The service call itself failed
    #[error("Submission service failed: {message}")]
    ServiceFailed { message: String },

    /// The submitted form does not belong to the current step
    #[error("Form '{form}' cannot be submitted on step {step}, which expects '{section}'")]
    SectionMismatch {
        step: u8,
        form: String,
        section: String,
    },

    /// The operation is only allowed on another step
    #[error("Expected step {expected}, but the flow is on step {current}")]
    OutOfStep { expected: u8, current: u8 },
}

impl SubmissionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SubmissionError::Rejected { .. } => "STEP_REJECTED",
            SubmissionError::ServiceFailed { .. } => "SUBMISSION_FAILED",
            SubmissionError::SectionMismatch { .. } => "SECTION_MISMATCH",
            SubmissionError::OutOfStep { .. } => "STEP_OUT_OF_ORDER",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for OnboardError {
    fn from(err: serde_json::Error) -> Self {
        OnboardError::Internal(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for OnboardError {
    fn from(err: std::io::Error) -> Self {
        OnboardError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// Patterns from configuration are reported as [`ConfigError::InvalidPattern`]
/// with their field; this covers patterns compiled elsewhere
impl From<regex::Error> for OnboardError {
    fn from(err: regex::Error) -> Self {
        OnboardError::Internal(format!("Regex error: {}", err))
    }
}

impl From<serde_yaml::Error> for OnboardError {
    fn from(err: serde_yaml::Error) -> Self {
        OnboardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Service implementations speak `anyhow`; their failures surface as submission errors
impl From<anyhow::Error> for OnboardError {
    fn from(err: anyhow::Error) -> Self {
        OnboardError::Submission(SubmissionError::ServiceFailed {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for onboarding operations
pub type OnboardResult<T> = Result<T, OnboardError>;
