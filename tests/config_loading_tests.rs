//! Integration tests for YAML rule configuration

mod wizard_harness;

use onboard::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use wizard_harness::*;

const PAYOUT_YAML: &str = r#"
forms:
  payout:
    accountHolder:
      required: true
      minLength: 2
      custom: personName
    accountNumber:
      required: true
      pattern: "[0-9]{6,18}"
      patternMessage: Account numbers have 6 to 18 digits
    branch:
      maxLength: 40
"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file_and_validate() {
    init_tracing();
    let file = write_temp(PAYOUT_YAML);
    let config = FormsConfig::from_yaml_file(file.path()).unwrap();
    let rules = config.rule_set("payout").unwrap();

    let mut form = FormController::new("payout", indexmap::IndexMap::<String, String>::new(), rules);
    form.update_form_data([("accountHolder", "N"), ("accountNumber", "12-34")]);
    assert!(!form.validate());

    assert_eq!(
        form.error("accountHolder"),
        Some("Account holder must be at least 2 characters")
    );
    assert_eq!(
        form.error("accountNumber"),
        Some("Account numbers have 6 to 18 digits")
    );
    assert_eq!(form.error("branch"), None);
    assert!(form.is_touched("branch"));
}

#[test]
fn test_missing_file() {
    let err = FormsConfig::from_yaml_file("/nonexistent/forms.yaml").unwrap_err();
    assert!(matches!(
        err,
        OnboardError::Config(ConfigError::FileNotFound { ref path }) if path == "/nonexistent/forms.yaml"
    ));
}

#[test]
fn test_parse_error_names_the_file() {
    let file = write_temp("forms:\n  payout: [\n");
    let err = FormsConfig::from_yaml_file(file.path()).unwrap_err();

    match err {
        OnboardError::Config(ConfigError::ParseError { file: Some(name), .. }) => {
            assert_eq!(name, file.path().display().to_string());
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_unknown_field_keys_are_rejected_by_type() {
    // `minLength` must be a number
    let err = FormsConfig::from_yaml_str("forms:\n  f:\n    a:\n      minLength: many\n").unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn test_empty_document_has_no_forms() {
    let config = FormsConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config.form_names().count(), 0);
}

#[test]
fn test_merge_files_with_override() {
    let base = write_temp(PAYOUT_YAML);
    let local = write_temp(
        r#"
forms:
  payout:
    accountNumber:
      required: true
      message: Enter the account number
"#,
    );

    let merged = FormsConfig::merge(vec![
        FormsConfig::default_config(),
        FormsConfig::from_yaml_file(base.path()).unwrap(),
        FormsConfig::from_yaml_file(local.path()).unwrap(),
    ]);

    assert!(merged.form_names().any(|name| name == "personalInfo"));
    let rules = merged.rule_set("payout").unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(
        validate_named_field("accountNumber", "", rules.get("accountNumber").unwrap()).as_deref(),
        Some("Enter the account number")
    );
}

#[test]
fn test_default_config_matches_builtin_rules() {
    let config = FormsConfig::default_config();
    let rules = config.rule_set("merchantInfo").unwrap();

    let result = validate_form(&valid_merchant_info(), &rules);
    assert!(result.is_valid, "{:?}", result.errors);

    let info = MerchantInfo {
        business_contact_number: "1111111".to_string(),
        ..valid_merchant_info()
    };
    let result = validate_form(&info, &rules);
    assert_eq!(
        result.errors["businessContactNumber"],
        "Phone number cannot be all ones"
    );
}
