//! Onboarding form data, partitioned by section
//!
//! The JSON shape is camelCase throughout so that partial updates coming from
//! the UI layer (`{"city": "Colombo"}`) merge straight into the sections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Opening time applied to new schedules
pub const DEFAULT_OPEN_TIME: &str = "09:00";
/// Closing time applied to new schedules
pub const DEFAULT_CLOSE_TIME: &str = "16:00";

// =============================================================================
// Sections
// =============================================================================

/// Named partitions of the onboarding data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    Address,
    #[serde(alias = "businessInfo")]
    MerchantInfo,
    MerchantAddress,
    OpeningHours,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::PersonalInfo,
        Section::Address,
        Section::MerchantInfo,
        Section::MerchantAddress,
        Section::OpeningHours,
    ];

    /// JSON key of the section
    pub fn key(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::Address => "address",
            Section::MerchantInfo => "merchantInfo",
            Section::MerchantAddress => "merchantAddress",
            Section::OpeningHours => "openingHours",
        }
    }

    /// Section for a JSON key; `businessInfo` is accepted for `merchantInfo`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "businessInfo" => Some(Section::MerchantInfo),
            key => Self::ALL.into_iter().find(|s| s.key() == key),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Owner's personal details (step 1)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Dial code picked from the country list, e.g. `+94`
    pub country_code: String,
    pub contact_number: String,
}

crate::impl_form_values!(PersonalInfo {
    first_name => "firstName",
    last_name => "lastName",
    email => "email",
    country_code => "countryCode",
    contact_number => "contactNumber",
});

/// Postal address; used for the owner (step 2) and the merchant (step 4)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

crate::impl_form_values!(Address {
    address_line1 => "addressLine1",
    address_line2 => "addressLine2",
    city => "city",
    state => "state",
    postal_code => "postalCode",
    country => "country",
});

/// Business details (step 3)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerchantInfo {
    pub business_name: String,
    pub business_type: String,
    pub business_email: String,
    pub business_contact_number: String,
    pub website: String,
    pub description: String,
}

crate::impl_form_values!(MerchantInfo {
    business_name => "businessName",
    business_type => "businessType",
    business_email => "businessEmail",
    business_contact_number => "businessContactNumber",
    website => "website",
    description => "description",
});

// =============================================================================
// Opening hours
// =============================================================================

/// Which of the two opening-hours shapes is authoritative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// One time range for every day
    #[default]
    Daily,
    /// A schedule per day of the week
    Customize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub open_time: String,
    pub close_time: String,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            open_time: DEFAULT_OPEN_TIME.to_string(),
            close_time: DEFAULT_CLOSE_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
}

impl DaySchedule {
    pub fn open(open_time: &str, close_time: &str) -> Self {
        Self {
            is_open: true,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
        }
    }

    pub fn closed() -> Self {
        Self {
            is_open: false,
            ..Self::open(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME)
        }
    }
}

/// Trading hours (step 5)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningHours {
    pub schedule_mode: ScheduleMode,
    pub daily: TimeRange,
    pub days: BTreeMap<Day, DaySchedule>,
}

impl Default for OpeningHours {
    /// Daily 09:00–16:00; customised: Monday–Saturday 09:00–16:00, Sunday closed
    fn default() -> Self {
        let days = Day::ALL
            .into_iter()
            .map(|day| {
                let schedule = match day {
                    Day::Sunday => DaySchedule::closed(),
                    _ => DaySchedule::open(DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME),
                };
                (day, schedule)
            })
            .collect();

        Self {
            schedule_mode: ScheduleMode::Daily,
            daily: TimeRange::default(),
            days,
        }
    }
}

impl OpeningHours {
    /// Effective schedule of one day under the active mode
    pub fn schedule_for(&self, day: Day) -> Option<DaySchedule> {
        match self.schedule_mode {
            ScheduleMode::Daily => Some(DaySchedule::open(&self.daily.open_time, &self.daily.close_time)),
            ScheduleMode::Customize => self.days.get(&day).cloned(),
        }
    }
}

// =============================================================================
// Aggregate
// =============================================================================

/// Everything the wizard collects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingFormData {
    pub personal_info: PersonalInfo,
    pub address: Address,
    #[serde(alias = "businessInfo")]
    pub merchant_info: MerchantInfo,
    pub merchant_address: Address,
    pub opening_hours: OpeningHours,
}

impl OnboardingFormData {
    /// One section as JSON
    pub fn section_value(&self, section: Section) -> serde_json::Result<Value> {
        match section {
            Section::PersonalInfo => serde_json::to_value(&self.personal_info),
            Section::Address => serde_json::to_value(&self.address),
            Section::MerchantInfo => serde_json::to_value(&self.merchant_info),
            Section::MerchantAddress => serde_json::to_value(&self.merchant_address),
            Section::OpeningHours => serde_json::to_value(&self.opening_hours),
        }
    }

    /// Keys of `partial` that `section` has no field for
    pub fn unknown_keys(&self, section: Section, partial: &Map<String, Value>) -> serde_json::Result<Vec<String>> {
        let current = self.section_value(section)?;
        let known = current.as_object();
        Ok(partial
            .keys()
            .filter(|key| !known.is_some_and(|fields| fields.contains_key(key.as_str())))
            .cloned()
            .collect())
    }

    /// Shallow-merge `partial` into one section
    ///
    /// Top-level keys of `partial` replace the section's keys; nested values
    /// (e.g. `days`) are replaced whole. Keys the section does not know are
    /// dropped. On error the section is left untouched.
    pub fn merge_section(&mut self, section: Section, partial: &Map<String, Value>) -> serde_json::Result<()> {
        match section {
            Section::PersonalInfo => merge_into(&mut self.personal_info, partial),
            Section::Address => merge_into(&mut self.address, partial),
            Section::MerchantInfo => merge_into(&mut self.merchant_info, partial),
            Section::MerchantAddress => merge_into(&mut self.merchant_address, partial),
            Section::OpeningHours => merge_into(&mut self.opening_hours, partial),
        }
    }
}

fn merge_into<T>(target: &mut T, partial: &Map<String, Value>) -> serde_json::Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut current = serde_json::to_value(&*target)?;
    if let Value::Object(fields) = &mut current {
        for (key, value) in partial {
            fields.insert(key.clone(), value.clone());
        }
    }
    *target = serde_json::from_value(current)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FormValues;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(Section::from_key("merchantAddress"), Some(Section::MerchantAddress));
        assert_eq!(Section::from_key("businessInfo"), Some(Section::MerchantInfo));
        assert_eq!(Section::from_key("merchantInfo"), Some(Section::MerchantInfo));
        assert_eq!(Section::from_key("payout"), None);
        for section in Section::ALL {
            assert_eq!(serde_json::to_value(section).unwrap(), section.key());
        }
        let alias: Section = serde_json::from_str(r#""businessInfo""#).unwrap();
        assert_eq!(alias, Section::MerchantInfo);
    }

    #[test]
    fn test_default_opening_hours() {
        let hours = OpeningHours::default();
        assert_eq!(hours.schedule_mode, ScheduleMode::Daily);
        assert_eq!(hours.daily.open_time, "09:00");
        assert_eq!(hours.daily.close_time, "16:00");
        assert_eq!(hours.days.len(), 7);

        for day in &Day::ALL[..6] {
            let schedule = &hours.days[day];
            assert!(schedule.is_open, "{:?} should be open", day);
            assert_eq!(schedule.open_time, "09:00");
            assert_eq!(schedule.close_time, "16:00");
        }
        assert!(!hours.days[&Day::Sunday].is_open);
    }

    #[test]
    fn test_opening_hours_json_shape() {
        let json = serde_json::to_value(OpeningHours::default()).unwrap();
        assert_eq!(json["scheduleMode"], "daily");
        assert_eq!(json["daily"]["openTime"], "09:00");
        assert_eq!(json["days"]["sunday"]["isOpen"], false);
        assert_eq!(json["days"]["monday"]["closeTime"], "16:00");

        let back: OpeningHours = serde_json::from_value(json).unwrap();
        assert_eq!(back, OpeningHours::default());
    }

    #[test]
    fn test_schedule_for_follows_mode() {
        let mut hours = OpeningHours::default();
        assert!(hours.schedule_for(Day::Sunday).unwrap().is_open);

        hours.schedule_mode = ScheduleMode::Customize;
        assert!(!hours.schedule_for(Day::Sunday).unwrap().is_open);
    }

    #[test]
    fn test_section_form_values() {
        let mut address = Address::default();
        assert!(address.set_field("postalCode", "10350".to_string()));
        assert_eq!(address.postal_code, "10350");
        assert_eq!(address.field("addressLine1"), Some(""));
        assert!(!address.set_field("zip", "1".to_string()));
        assert_eq!(Address::FIELDS.len(), 6);
        assert_eq!(PersonalInfo::FIELDS[0], "firstName");
    }

    #[test]
    fn test_merge_section_is_shallow_and_isolated() {
        let mut data = OnboardingFormData::default();
        data.address.country = "Sri Lanka".to_string();

        data.merge_section(Section::Address, &object(json!({"city": "Colombo"})))
            .unwrap();

        assert_eq!(data.address.city, "Colombo");
        assert_eq!(data.address.country, "Sri Lanka");
        assert_eq!(data.merchant_address, Address::default());
        assert_eq!(data.personal_info, PersonalInfo::default());
    }

    #[test]
    fn test_merge_replaces_nested_values_whole() {
        let mut data = OnboardingFormData::default();
        data.merge_section(
            Section::OpeningHours,
            &object(json!({
                "scheduleMode": "customize",
                "days": {"monday": {"isOpen": true, "openTime": "08:00", "closeTime": "22:00"}}
            })),
        )
        .unwrap();

        assert_eq!(data.opening_hours.schedule_mode, ScheduleMode::Customize);
        assert_eq!(data.opening_hours.days.len(), 1);
        assert_eq!(data.opening_hours.daily, TimeRange::default());
    }

    #[test]
    fn test_merge_wrong_type_leaves_section_untouched() {
        let mut data = OnboardingFormData::default();
        data.personal_info.first_name = "Ana".to_string();

        let result = data.merge_section(
            Section::PersonalInfo,
            &object(json!({"firstName": 42, "lastName": "Silva"})),
        );

        assert!(result.is_err());
        assert_eq!(data.personal_info.first_name, "Ana");
        assert_eq!(data.personal_info.last_name, "");
    }

    #[test]
    fn test_unknown_keys() {
        let data = OnboardingFormData::default();
        let address = object(json!({"addressLine1": "12 Galle Rd", "city": "Colombo"}));

        assert!(data.unknown_keys(Section::Address, &address).unwrap().is_empty());
        assert!(data.unknown_keys(Section::MerchantAddress, &address).unwrap().is_empty());
        assert_eq!(
            data.unknown_keys(Section::PersonalInfo, &address).unwrap(),
            vec!["addressLine1".to_string(), "city".to_string()]
        );
    }

    #[test]
    fn test_form_data_accepts_business_info_alias() {
        let data: OnboardingFormData = serde_json::from_value(json!({
            "businessInfo": {"businessName": "Spice Route"}
        }))
        .unwrap();
        assert_eq!(data.merchant_info.business_name, "Spice Route");
        assert_eq!(data.opening_hours, OpeningHours::default());
    }

    #[test]
    fn test_section_value() {
        let mut data = OnboardingFormData::default();
        data.merchant_info.website = "https://spice.lk".to_string();
        let value = data.section_value(Section::MerchantInfo).unwrap();
        assert_eq!(value["website"], "https://spice.lk");
    }
}
