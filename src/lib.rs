//! # Onboard-RS
//!
//! Form validation and step-flow state for a five-step merchant onboarding
//! wizard.
//!
//! ## Features
//!
//! - **Declarative Rules**: required, email, pattern, length bounds and named custom checks
//! - **Form Controller**: change, blur and submit handlers with touched-gated errors
//! - **Guarded Flow**: the current step never leaves 1..=5
//! - **Section Merges**: partial updates only ever touch their own section
//! - **Configuration-Based**: define rule sets via YAML configuration
//! - **Change Events**: every mutation is broadcast to subscribers
//!
//! ## Quick Start
//!
//! ```rust
//! use onboard::prelude::*;
//! use onboard::onboarding::rules::personal_info_rules;
//!
//! let mut form = FormController::new("personalInfo", PersonalInfo::default(), personal_info_rules());
//! form.handle_input_change("email", &InputEvent::new("merchant@"));
//! form.handle_blur("email");
//! assert_eq!(form.error("email"), Some("Please enter a valid email address"));
//!
//! let mut flow = OnboardingFlow::new();
//! flow.go_to_next_step();
//! flow.go_to_step(7); // ignored
//! assert_eq!(flow.current_step(), OnboardingStep::Address);
//! ```

pub mod config;
pub mod core;
pub mod onboarding;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConfigError, OnboardError, OnboardResult, SubmissionError, ValidationError},
        events::{EventBus, EventEnvelope, FlowEvent, FormEvent, OnboardEvent},
        field::{FieldProps, FormValues, InputEvent},
        form::FormController,
        label::Labeler,
        validation::{
            CustomValidator, DigitRange, FieldErrors, FieldPattern, FormValidation,
            ValidationRule, ValidationRuleSet, is_valid_field, validate_field, validate_form,
            validate_named_field, validators,
        },
    };

    // === Onboarding ===
    pub use crate::onboarding::{
        Address, Day, DaySchedule, InMemoryOnboardingService, MerchantInfo, OnboardingFlow,
        OnboardingFormData, OnboardingService, OnboardingStep, OnboardingWizard, OpeningHours,
        PersonalInfo, ScheduleMode, Section, StepOutcome, StepResponse, TimeRange,
        validate_opening_hours, validate_section,
    };

    // === Config ===
    pub use crate::config::{FormsConfig, RuleConfig};

    // === Macros ===
    pub use crate::impl_form_values;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
