mod common;

use common::dec;
use pretty_assertions::assert_eq;
use std::str::FromStr;

use timecast::{OvertimeType, SystemConfig};

#[test]
fn parses_full_configuration_document() {
    let raw = r#"{
        "payrollTaxPercentage": "5.45",
        "payrollTaxFreeThreshold": "1200000",
        "insurancePercentage": "2",
        "superannuationPercentage": "12",
        "costRateFormula": "{salary}/52/38",
        "defaultHoursPerWeek": 37.5,
        "defaultOvertimeType": "eligible",
        "requireApprovalsByDefault": false,
        "allowOvertimeByDefault": true,
        "defaultBillableStatus": false
    }"#;

    let config = SystemConfig::from_json(raw).unwrap();

    assert_eq!(config.payroll_tax_percentage, Some(dec("5.45")));
    assert_eq!(config.payroll_tax_free_threshold, Some(dec("1200000")));
    assert_eq!(config.cost_rate_formula.as_deref(), Some("{salary}/52/38"));
    assert_eq!(config.default_hours_per_week, 37.5);
    assert_eq!(config.default_overtime_type, OvertimeType::Eligible);
    assert!(!config.require_approvals_by_default);
    assert!(config.allow_overtime_by_default);
    assert!(!config.default_billable_status);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = SystemConfig::from_json("{}").unwrap();

    assert_eq!(config.payroll_tax_percentage, None);
    assert_eq!(config.cost_rate_formula, None);
    assert_eq!(config.default_hours_per_week, 38.0);
    assert_eq!(config.default_overtime_type, OvertimeType::No);
    assert!(config.require_approvals_by_default);
    assert!(!config.allow_overtime_by_default);
    assert!(config.default_billable_status);
}

#[test]
fn malformed_document_is_an_error() {
    assert!(SystemConfig::from_json("not json").is_err());
}

#[test]
fn overtime_type_round_trips_through_strings() {
    for (text, expected) in [
        ("no", OvertimeType::No),
        ("eligible", OvertimeType::Eligible),
        ("all", OvertimeType::All),
    ] {
        assert_eq!(OvertimeType::from_str(text).unwrap(), expected);
        assert_eq!(expected.to_string(), text);
    }
    assert!(OvertimeType::from_str("sometimes").is_err());
}
