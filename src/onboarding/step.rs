//! The five onboarding steps

use serde::{Deserialize, Serialize};
use std::fmt;

use super::data::Section;

/// One step of the wizard; the discriminant is the step number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OnboardingStep {
    PersonalInfo = 1,
    Address = 2,
    MerchantInfo = 3,
    MerchantAddress = 4,
    OpeningHours = 5,
}

impl OnboardingStep {
    /// Every step in wizard order
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::PersonalInfo,
        OnboardingStep::Address,
        OnboardingStep::MerchantInfo,
        OnboardingStep::MerchantAddress,
        OnboardingStep::OpeningHours,
    ];

    pub const FIRST: OnboardingStep = OnboardingStep::PersonalInfo;
    pub const LAST: OnboardingStep = OnboardingStep::OpeningHours;

    /// Step for a number, `None` outside 1..=5
    pub fn from_number(n: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() as i64 == n)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Following step; the last step maps to itself
    pub fn next(self) -> Self {
        Self::from_number(self.number() as i64 + 1).unwrap_or(self)
    }

    /// Preceding step; the first step maps to itself
    pub fn previous(self) -> Self {
        Self::from_number(self.number() as i64 - 1).unwrap_or(self)
    }

    /// Form section collected on this step
    pub fn section(self) -> Section {
        match self {
            OnboardingStep::PersonalInfo => Section::PersonalInfo,
            OnboardingStep::Address => Section::Address,
            OnboardingStep::MerchantInfo => Section::MerchantInfo,
            OnboardingStep::MerchantAddress => Section::MerchantAddress,
            OnboardingStep::OpeningHours => Section::OpeningHours,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::PersonalInfo => "Personal Information",
            OnboardingStep::Address => "Address",
            OnboardingStep::MerchantInfo => "Merchant Information",
            OnboardingStep::MerchantAddress => "Merchant Address",
            OnboardingStep::OpeningHours => "Opening Hours",
        }
    }
}

impl Default for OnboardingStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<OnboardingStep> for u8 {
    fn from(step: OnboardingStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for OnboardingStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n as i64).ok_or_else(|| format!("unknown onboarding step {}", n))
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
