//! Hand-off of validated step data to a backend
//!
//! The wizard validates locally first; only a clean form reaches the
//! [`OnboardingService`]. The flow advances when the service answers
//! `success: true` and stays on the step otherwise. Submitted values are
//! committed to the flow only once the service has accepted them.

use super::data::{OnboardingFormData, OpeningHours, Section};
use super::flow::OnboardingFlow;
use super::rules::{validate_opening_hours, validate_section};
use super::step::OnboardingStep;
use crate::core::error::{OnboardError, OnboardResult, SubmissionError, ValidationError};
use crate::core::field::FormValues;
use crate::core::form::FormController;
use crate::core::validation::FieldErrors;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const DEFAULT_REJECTION: &str = "The submitted details could not be accepted";

/// Backend answer to a step or completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResponse {
    pub fn accepted(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Backend that checks each step and receives the finished data
///
/// Payloads are the form values exactly as entered; the service does its own
/// normalisation.
#[async_trait]
pub trait OnboardingService: Send + Sync {
    async fn validate_step(&self, step: OnboardingStep, payload: Value) -> Result<StepResponse>;

    async fn complete_onboarding(&self, data: &OnboardingFormData) -> Result<StepResponse>;
}

/// In-memory onboarding service for testing and development
///
/// Accepts everything unless told to reject a step. Uses RwLock for
/// thread-safe access; clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOnboardingService {
    submissions: Arc<RwLock<Vec<(OnboardingStep, Value)>>>,
    rejections: Arc<RwLock<HashMap<OnboardingStep, String>>>,
    completed: Arc<RwLock<Option<OnboardingFormData>>>,
}

impl InMemoryOnboardingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `success: false` with `message` for every submission of `step`
    pub fn reject_step(&self, step: OnboardingStep, message: impl Into<String>) -> Result<()> {
        let mut rejections = self
            .rejections
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        rejections.insert(step, message.into());
        Ok(())
    }

    /// Accepted step payloads in submission order
    pub fn submissions(&self) -> Result<Vec<(OnboardingStep, Value)>> {
        let submissions = self
            .submissions
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(submissions.clone())
    }

    /// Data received by the last successful completion
    pub fn completed(&self) -> Result<Option<OnboardingFormData>> {
        let completed = self
            .completed
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(completed.clone())
    }

    fn rejection_for(&self, step: OnboardingStep) -> Result<Option<String>> {
        let rejections = self
            .rejections
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rejections.get(&step).cloned())
    }
}

#[async_trait]
impl OnboardingService for InMemoryOnboardingService {
    async fn validate_step(&self, step: OnboardingStep, payload: Value) -> Result<StepResponse> {
        if let Some(message) = self.rejection_for(step)? {
            return Ok(StepResponse::rejected(message));
        }

        let mut submissions = self
            .submissions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        submissions.push((step, payload));

        Ok(StepResponse::accepted(None))
    }

    async fn complete_onboarding(&self, data: &OnboardingFormData) -> Result<StepResponse> {
        if let Some(message) = self.rejection_for(OnboardingStep::LAST)? {
            return Ok(StepResponse::rejected(message));
        }

        let mut completed = self
            .completed
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *completed = Some(data.clone());

        Ok(StepResponse::accepted(Some(serde_json::json!({
            "status": "submitted"
        }))))
    }
}

/// What a submit attempt led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Accepted; the flow moved to the next step
    Advanced,
    /// Local validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The service said no; the flow stayed on the step
    Rejected(String),
    /// The whole onboarding was accepted
    Completed,
}

impl StepOutcome {
    /// Lift the failure outcomes of a submit on `step` into errors
    ///
    /// `Invalid` becomes [`ValidationError::FieldErrors`] and `Rejected`
    /// becomes [`SubmissionError::Rejected`]; `Advanced` and `Completed`
    /// pass through.
    pub fn into_result(self, step: OnboardingStep) -> OnboardResult<StepOutcome> {
        match self {
            StepOutcome::Invalid(errors) => Err(ValidationError::FieldErrors(errors).into()),
            StepOutcome::Rejected(message) => Err(SubmissionError::Rejected {
                step: step.number(),
                message,
            }
            .into()),
            outcome => Ok(outcome),
        }
    }
}

fn section_mismatch(step: OnboardingStep, form: &str) -> OnboardError {
    SubmissionError::SectionMismatch {
        step: step.number(),
        form: form.to_string(),
        section: step.section().key().to_string(),
    }
    .into()
}

/// Ties the flow controller to a submission service
pub struct OnboardingWizard<S: OnboardingService> {
    flow: OnboardingFlow,
    service: S,
}

impl<S: OnboardingService> OnboardingWizard<S> {
    pub fn new(service: S) -> Self {
        Self::with_flow(OnboardingFlow::new(), service)
    }

    pub fn with_flow(flow: OnboardingFlow, service: S) -> Self {
        Self { flow, service }
    }

    pub fn flow(&self) -> &OnboardingFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut OnboardingFlow {
        &mut self.flow
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate `form`, send its values for the current step and advance
    ///
    /// The form must belong to the current step: a form named after another
    /// section, or holding fields the step's section does not have, is refused
    /// with [`SubmissionError::SectionMismatch`] before anything is sent. On
    /// acceptance the values are merged into the current step's section
    /// before moving on. A failing service call is returned as an error and
    /// leaves the flow unchanged.
    pub async fn submit_step<T>(&mut self, form: &mut FormController<T>) -> OnboardResult<StepOutcome>
    where
        T: FormValues + Serialize,
    {
        let step = self.flow.current_step();
        let section = step.section();
        if Section::from_key(form.name()).is_some_and(|named| named != section) {
            tracing::warn!(step = step.number(), form = form.name(), "form submitted on the wrong step");
            return Err(section_mismatch(step, form.name()));
        }

        if !form.validate() {
            tracing::debug!(step = step.number(), errors = form.errors().len(), "step not submitted");
            return Ok(StepOutcome::Invalid(form.errors().clone()));
        }

        let payload = serde_json::to_value(form.values())?;
        if !self.fits_section(section, &payload)? {
            tracing::warn!(step = step.number(), form = form.name(), "form does not fit the step's section");
            return Err(section_mismatch(step, form.name()));
        }

        let response = self.service.validate_step(step, payload.clone()).await?;
        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            tracing::warn!(step = step.number(), error = %message, "step rejected");
            return Ok(StepOutcome::Rejected(message));
        }

        if !self.flow.update_form_data(section, payload) {
            return Err(section_mismatch(step, form.name()));
        }
        self.flow.go_to_next_step();
        Ok(StepOutcome::Advanced)
    }

    /// Validate the opening hours and complete the onboarding
    ///
    /// Only allowed on the last step. The hours and every earlier section
    /// must validate; section errors are keyed `personalInfo.firstName`-style.
    /// The service receives the collected data with the new hours, and the
    /// flow takes the hours only once the service has accepted them.
    pub async fn submit_opening_hours(&mut self, hours: OpeningHours) -> OnboardResult<StepOutcome> {
        let current = self.flow.current_step();
        if !self.flow.is_last_step() {
            return Err(SubmissionError::OutOfStep {
                expected: OnboardingStep::LAST.number(),
                current: current.number(),
            }
            .into());
        }

        let validation = validate_opening_hours(&hours);
        if !validation.is_valid {
            return Ok(StepOutcome::Invalid(validation.errors));
        }

        let mut candidate = self.flow.form_data().clone();
        candidate.opening_hours = hours;

        let errors: FieldErrors = Section::ALL
            .into_iter()
            .filter(|section| *section != Section::OpeningHours)
            .flat_map(|section| {
                validate_section(&candidate, section)
                    .errors
                    .into_iter()
                    .map(move |(field, message)| (format!("{}.{}", section.key(), field), message))
            })
            .collect();
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "earlier sections incomplete");
            return Ok(StepOutcome::Invalid(errors));
        }

        let response = self.service.complete_onboarding(&candidate).await?;
        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            tracing::warn!(error = %message, "onboarding rejected");
            return Ok(StepOutcome::Rejected(message));
        }

        let payload = serde_json::to_value(&candidate.opening_hours)?;
        self.flow.update_form_data(Section::OpeningHours, payload);
        tracing::info!(session = %self.flow.session_id(), "onboarding completed");
        Ok(StepOutcome::Completed)
    }

    /// Whether `payload` only names fields of `section` and merges cleanly
    fn fits_section(&self, section: Section, payload: &Value) -> OnboardResult<bool> {
        let Value::Object(fields) = payload else {
            return Ok(false);
        };
        let mut candidate = self.flow.form_data().clone();
        if !candidate.unknown_keys(section, fields)?.is_empty() {
            return Ok(false);
        }
        Ok(candidate.merge_section(section, fields).is_ok())
    }
}
