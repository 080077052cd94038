//! Five-step merchant onboarding wizard
//!
//! 1. Personal information
//! 2. Address
//! 3. Merchant information
//! 4. Merchant address
//! 5. Opening hours

pub mod data;
pub mod flow;
pub mod rules;
pub mod step;
pub mod submission;

pub use data::{
    Address, Day, DaySchedule, MerchantInfo, OnboardingFormData, OpeningHours, PersonalInfo,
    ScheduleMode, Section, TimeRange,
};
pub use flow::OnboardingFlow;
pub use rules::{validate_opening_hours, validate_section};
pub use step::OnboardingStep;
pub use submission::{
    InMemoryOnboardingService, OnboardingService, OnboardingWizard, StepOutcome, StepResponse,
};
