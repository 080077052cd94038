//! Shared test harness for onboarding integration tests
//!
//! Provides filled-in section fixtures, a tracing initialiser and the
//! `onboarding_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod wizard_harness;
//! use wizard_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod service_contract;

use onboard::onboarding::{Address, MerchantInfo, PersonalInfo};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test writer; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("onboard=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn valid_personal_info() -> PersonalInfo {
    PersonalInfo {
        first_name: "Nimal".to_string(),
        last_name: "Perera".to_string(),
        email: "nimal@example.com".to_string(),
        country_code: "+94".to_string(),
        contact_number: "0771234567".to_string(),
    }
}

pub fn valid_address() -> Address {
    Address {
        address_line1: "42 Galle Road".to_string(),
        address_line2: "Kollupitiya".to_string(),
        city: "Colombo".to_string(),
        state: "Western".to_string(),
        postal_code: "00300".to_string(),
        country: "Sri Lanka".to_string(),
    }
}

pub fn valid_merchant_address() -> Address {
    Address {
        address_line1: "7 Temple Street".to_string(),
        address_line2: String::new(),
        city: "Kandy".to_string(),
        state: "Central".to_string(),
        postal_code: "20000".to_string(),
        country: "Sri Lanka".to_string(),
    }
}

pub fn valid_merchant_info() -> MerchantInfo {
    MerchantInfo {
        business_name: "Spice Route (Pvt) Ltd.".to_string(),
        business_type: "restaurant".to_string(),
        business_email: "hello@spiceroute.lk".to_string(),
        business_contact_number: "0112345678".to_string(),
        website: "https://spiceroute.lk".to_string(),
        description: "Sri Lankan home cooking".to_string(),
    }
}
