use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Overtime eligibility applied to new users by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OvertimeType {
    #[default]
    No,
    Eligible,
    All,
}

impl std::fmt::Display for OvertimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OvertimeType::No => write!(f, "no"),
            OvertimeType::Eligible => write!(f, "eligible"),
            OvertimeType::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for OvertimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" => Ok(OvertimeType::No),
            "eligible" => Ok(OvertimeType::Eligible),
            "all" => Ok(OvertimeType::All),
            _ => Err(format!("Invalid OvertimeType: {}", s)),
        }
    }
}

/// Process-wide configuration record, created at setup time and edited
/// through the admin form. Always passed explicitly to the engine.
///
/// The percentage fields and the formula are `Option` because a freshly
/// set-up system has none of them configured yet; the cost-rate evaluator
/// turns `None` into a configuration error rather than guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    pub payroll_tax_percentage: Option<BigDecimal>, // whole-number percent, e.g. 15
    pub payroll_tax_free_threshold: Option<BigDecimal>, // annual amount
    pub insurance_percentage: Option<BigDecimal>,
    pub superannuation_percentage: Option<BigDecimal>,
    pub cost_rate_formula: Option<String>,
    pub default_hours_per_week: f64,
    pub default_overtime_type: OvertimeType,
    pub require_approvals_by_default: bool,
    pub allow_overtime_by_default: bool,
    pub default_billable_status: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            payroll_tax_percentage: None,
            payroll_tax_free_threshold: None,
            insurance_percentage: None,
            superannuation_percentage: None,
            cost_rate_formula: None,
            default_hours_per_week: 38.0,
            default_overtime_type: OvertimeType::No,
            require_approvals_by_default: true,
            allow_overtime_by_default: false,
            default_billable_status: true,
        }
    }
}

impl SystemConfig {
    /// Parse the configuration document as stored by the data layer
    /// (camelCase JSON; missing fields fall back to defaults).
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse system configuration document")
    }
}
