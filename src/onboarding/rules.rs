//! Static rule sets of the onboarding sections
//!
//! Country and dial-code fields are only checked for presence: the option
//! lists live with the select controls.

use super::data::{Day, OnboardingFormData, OpeningHours, ScheduleMode, Section};
use crate::core::validation::validators::{
    business_name, contact_number, person_name, postal_code_pattern, time_pattern, url_pattern,
};
use crate::core::validation::{
    FieldErrors, FormValidation, ValidationRule, ValidationRuleSet, validate_form,
    validate_named_field,
};
use chrono::NaiveTime;

pub const TIME_MESSAGE: &str = "Please enter a valid time (HH:MM)";
pub const CLOSE_AFTER_OPEN_MESSAGE: &str = "Closing time must be later than opening time";
pub const NO_OPEN_DAY_MESSAGE: &str = "Select at least one open day";

fn name_rule() -> ValidationRule {
    ValidationRule::new()
        .required()
        .min_length(2)
        .max_length(50)
        .custom(person_name())
}

pub fn personal_info_rules() -> ValidationRuleSet {
    ValidationRuleSet::new()
        .field("firstName", name_rule())
        .field("lastName", name_rule())
        .field("email", ValidationRule::new().required().email().max_length(100))
        .field(
            "countryCode",
            ValidationRule::new()
                .required()
                .message("Please select a country code"),
        )
        .field(
            "contactNumber",
            ValidationRule::new().required().custom(contact_number()),
        )
}

pub fn address_rules() -> ValidationRuleSet {
    ValidationRuleSet::new()
        .field(
            "addressLine1",
            ValidationRule::new().required().min_length(3).max_length(100),
        )
        .field("addressLine2", ValidationRule::new().max_length(100))
        .field("city", ValidationRule::new().required().max_length(50))
        .field("state", ValidationRule::new().max_length(50))
        .field(
            "postalCode",
            ValidationRule::new()
                .required()
                .pattern(postal_code_pattern().clone())
                .pattern_message("Please enter a valid postal code"),
        )
        .field(
            "country",
            ValidationRule::new()
                .required()
                .message("Please select a country"),
        )
}

pub fn merchant_info_rules() -> ValidationRuleSet {
    ValidationRuleSet::new()
        .field(
            "businessName",
            ValidationRule::new()
                .required()
                .min_length(2)
                .max_length(100)
                .custom(business_name()),
        )
        .field(
            "businessType",
            ValidationRule::new()
                .required()
                .message("Please select a business type"),
        )
        .field("businessEmail", ValidationRule::new().required().email())
        .field(
            "businessContactNumber",
            ValidationRule::new().required().custom(contact_number()),
        )
        .field(
            "website",
            ValidationRule::new()
                .pattern(url_pattern().clone())
                .pattern_message("Please enter a valid URL starting with http:// or https://"),
        )
        .field("description", ValidationRule::new().max_length(500))
}

/// The merchant's premises use the same rules as the owner's address
pub fn merchant_address_rules() -> ValidationRuleSet {
    address_rules()
}

/// Rule set of a flat section; opening hours are validated by
/// [`validate_opening_hours`] instead
pub fn rules_for(section: Section) -> Option<ValidationRuleSet> {
    match section {
        Section::PersonalInfo => Some(personal_info_rules()),
        Section::Address => Some(address_rules()),
        Section::MerchantInfo => Some(merchant_info_rules()),
        Section::MerchantAddress => Some(merchant_address_rules()),
        Section::OpeningHours => None,
    }
}

fn time_rule() -> ValidationRule {
    ValidationRule::new()
        .required()
        .pattern(time_pattern().clone())
        .pattern_message(TIME_MESSAGE)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Check one open/close pair, writing errors under `prefix.openTime` / `prefix.closeTime`
fn check_range(prefix: &str, open_time: &str, close_time: &str, errors: &mut FieldErrors) {
    let rule = time_rule();
    let open_key = format!("{}.openTime", prefix);
    let close_key = format!("{}.closeTime", prefix);

    let open_error = validate_named_field(&open_key, open_time, &rule);
    let close_error = validate_named_field(&close_key, close_time, &rule);

    if open_error.is_none() && close_error.is_none() {
        if let (Some(open), Some(close)) = (parse_time(open_time), parse_time(close_time)) {
            if close <= open {
                errors.insert(close_key, CLOSE_AFTER_OPEN_MESSAGE.to_string());
            }
        }
        return;
    }

    if let Some(message) = open_error {
        errors.insert(open_key, message);
    }
    if let Some(message) = close_error {
        errors.insert(close_key, message);
    }
}

/// Validate the shape selected by `schedule_mode`; the other one is ignored
///
/// Error keys are `daily.openTime`-style in daily mode and
/// `monday.closeTime`-style in customised mode, plus `days` when no day is
/// open at all.
pub fn validate_opening_hours(hours: &OpeningHours) -> FormValidation {
    let mut errors = FieldErrors::new();

    match hours.schedule_mode {
        ScheduleMode::Daily => {
            check_range("daily", &hours.daily.open_time, &hours.daily.close_time, &mut errors);
        }
        ScheduleMode::Customize => {
            let mut any_open = false;
            for day in Day::ALL {
                let Some(schedule) = hours.days.get(&day).filter(|s| s.is_open) else {
                    continue;
                };
                any_open = true;
                check_range(day.key(), &schedule.open_time, &schedule.close_time, &mut errors);
            }
            if !any_open {
                errors.insert("days".to_string(), NO_OPEN_DAY_MESSAGE.to_string());
            }
        }
    }

    FormValidation::from_errors(errors)
}

/// Validate one section of the aggregate
pub fn validate_section(data: &OnboardingFormData, section: Section) -> FormValidation {
    match section {
        Section::PersonalInfo => validate_form(&data.personal_info, &personal_info_rules()),
        Section::Address => validate_form(&data.address, &address_rules()),
        Section::MerchantInfo => validate_form(&data.merchant_info, &merchant_info_rules()),
        Section::MerchantAddress => validate_form(&data.merchant_address, &merchant_address_rules()),
        Section::OpeningHours => validate_opening_hours(&data.opening_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::data::{Address, DaySchedule, MerchantInfo, PersonalInfo};

    fn valid_personal_info() -> PersonalInfo {
        PersonalInfo {
            first_name: "Nimal".to_string(),
            last_name: "Perera".to_string(),
            email: "nimal@example.com".to_string(),
            country_code: "+94".to_string(),
            contact_number: "771234567".to_string(),
        }
    }

    fn valid_address() -> Address {
        Address {
            address_line1: "42 Galle Road".to_string(),
            address_line2: String::new(),
            city: "Colombo".to_string(),
            state: "Western".to_string(),
            postal_code: "00300".to_string(),
            country: "Sri Lanka".to_string(),
        }
    }

    #[test]
    fn test_personal_info_valid() {
        let result = validate_form(&valid_personal_info(), &personal_info_rules());
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_personal_info_blank_reports_required_fields() {
        let result = validate_form(&PersonalInfo::default(), &personal_info_rules());
        assert_eq!(result.errors.len(), 5);
        assert_eq!(result.errors["firstName"], "First name is required");
        assert_eq!(result.errors["countryCode"], "Please select a country code");
        assert_eq!(result.errors["contactNumber"], "Contact number is required");
    }

    #[test]
    fn test_personal_info_bad_values() {
        let info = PersonalInfo {
            first_name: "N".to_string(),
            last_name: "P3rera".to_string(),
            email: "nimal@".to_string(),
            contact_number: "0000000".to_string(),
            ..valid_personal_info()
        };
        let result = validate_form(&info, &personal_info_rules());
        assert_eq!(result.errors["firstName"], "First name must be at least 2 characters");
        assert!(result.errors["lastName"].starts_with("Name can only contain"));
        assert_eq!(result.errors["email"], "Please enter a valid email address");
        assert!(result.errors["contactNumber"].contains("all zeros"));
    }

    #[test]
    fn test_address_rules() {
        assert!(validate_form(&valid_address(), &address_rules()).is_valid);

        let address = Address {
            postal_code: "#1".to_string(),
            country: String::new(),
            ..valid_address()
        };
        let result = validate_form(&address, &address_rules());
        assert_eq!(result.errors["postalCode"], "Please enter a valid postal code");
        assert_eq!(result.errors["country"], "Please select a country");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_country_is_not_checked_against_a_list() {
        let address = Address {
            country: "Atlantis".to_string(),
            ..valid_address()
        };
        assert!(validate_form(&address, &address_rules()).is_valid);
    }

    #[test]
    fn test_merchant_info_rules() {
        let info = MerchantInfo {
            business_name: "Spice Route (Pvt) Ltd.".to_string(),
            business_type: "restaurant".to_string(),
            business_email: "hello@spiceroute.lk".to_string(),
            business_contact_number: "0112345678".to_string(),
            website: String::new(),
            description: String::new(),
        };
        assert!(validate_form(&info, &merchant_info_rules()).is_valid);

        let info = MerchantInfo {
            business_name: "Spice<Route>".to_string(),
            website: "spiceroute.lk".to_string(),
            ..info
        };
        let result = validate_form(&info, &merchant_info_rules());
        assert!(result.errors["businessName"].starts_with("Business name can only contain"));
        assert_eq!(
            result.errors["website"],
            "Please enter a valid URL starting with http:// or https://"
        );
    }

    #[test]
    fn test_rules_for_sections() {
        assert!(rules_for(Section::OpeningHours).is_none());
        assert_eq!(
            rules_for(Section::MerchantAddress).unwrap().len(),
            address_rules().len()
        );
    }

    #[test]
    fn test_default_opening_hours_are_valid() {
        assert!(validate_opening_hours(&OpeningHours::default()).is_valid);

        let mut hours = OpeningHours::default();
        hours.schedule_mode = ScheduleMode::Customize;
        assert!(validate_opening_hours(&hours).is_valid);
    }

    #[test]
    fn test_daily_mode_ignores_custom_days() {
        let mut hours = OpeningHours::default();
        hours
            .days
            .insert(Day::Monday, DaySchedule::open("25:00", "nope"));
        assert!(validate_opening_hours(&hours).is_valid);

        hours.daily.open_time = "7am".to_string();
        let result = validate_opening_hours(&hours);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors["daily.openTime"], TIME_MESSAGE);
    }

    #[test]
    fn test_customize_mode_ignores_daily_range() {
        let mut hours = OpeningHours::default();
        hours.schedule_mode = ScheduleMode::Customize;
        hours.daily.close_time = String::new();
        hours.days.insert(Day::Friday, DaySchedule::open("18:00", "10:00"));
        // closed days are not validated
        hours.days.insert(
            Day::Sunday,
            DaySchedule {
                is_open: false,
                open_time: String::new(),
                close_time: String::new(),
            },
        );

        let result = validate_opening_hours(&hours);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors["friday.closeTime"], CLOSE_AFTER_OPEN_MESSAGE);
    }

    #[test]
    fn test_customize_mode_requires_an_open_day() {
        let mut hours = OpeningHours::default();
        hours.schedule_mode = ScheduleMode::Customize;
        for schedule in hours.days.values_mut() {
            schedule.is_open = false;
        }
        let result = validate_opening_hours(&hours);
        assert_eq!(result.errors["days"], NO_OPEN_DAY_MESSAGE);
    }

    #[test]
    fn test_missing_time_is_required() {
        let mut hours = OpeningHours::default();
        hours.daily.close_time = " ".to_string();
        let result = validate_opening_hours(&hours);
        assert_eq!(result.errors["daily.closeTime"], "Daily close time is required");
    }

    #[test]
    fn test_validate_section() {
        let mut data = OnboardingFormData::default();
        assert!(!validate_section(&data, Section::PersonalInfo).is_valid);
        assert!(validate_section(&data, Section::OpeningHours).is_valid);

        data.personal_info = valid_personal_info();
        assert!(validate_section(&data, Section::PersonalInfo).is_valid);
        assert!(!validate_section(&data, Section::MerchantAddress).is_valid);
    }
}
