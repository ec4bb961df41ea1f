use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current-period minus previous-period, computed over the forecasted
/// metrics of two adjacent reporting months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastVariance {
    pub hours: BigDecimal,
    pub cost: BigDecimal,
    pub revenue: BigDecimal,
    pub gross_margin: BigDecimal,
}

impl ForecastVariance {
    pub fn zeroed() -> Self {
        ForecastVariance {
            hours: BigDecimal::zero(),
            cost: BigDecimal::zero(),
            revenue: BigDecimal::zero(),
            gross_margin: BigDecimal::zero(),
        }
    }
}

/// Per-project financial aggregate for one reporting month. Derived, never
/// stored; margins are percentages rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForecast {
    pub project_id: Uuid,
    /// First day of the reporting month.
    pub month: NaiveDate,
    pub total_forecasted_hours: BigDecimal,
    pub total_actual_hours: BigDecimal,
    pub total_forecasted_cost: BigDecimal,
    pub total_actual_cost: BigDecimal,
    pub total_forecasted_revenue: BigDecimal,
    pub total_actual_revenue: BigDecimal,
    pub gross_margin: BigDecimal,
    pub actual_gross_margin: BigDecimal,
    /// Filled by `attach_variance` against the previous period.
    pub variance: Option<ForecastVariance>,
}

impl ProjectForecast {
    pub fn empty(project_id: Uuid, month: NaiveDate) -> Self {
        ProjectForecast {
            project_id,
            month,
            total_forecasted_hours: BigDecimal::zero(),
            total_actual_hours: BigDecimal::zero(),
            total_forecasted_cost: BigDecimal::zero(),
            total_actual_cost: BigDecimal::zero(),
            total_forecasted_revenue: BigDecimal::zero(),
            total_actual_revenue: BigDecimal::zero(),
            gross_margin: BigDecimal::zero(),
            actual_gross_margin: BigDecimal::zero(),
            variance: None,
        }
    }
}

/// Portfolio-level totals across all project forecasts of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub month: NaiveDate,
    pub total_forecasted_hours: BigDecimal,
    pub total_actual_hours: BigDecimal,
    pub total_forecasted_cost: BigDecimal,
    pub total_actual_cost: BigDecimal,
    pub total_forecasted_revenue: BigDecimal,
    pub total_actual_revenue: BigDecimal,
    pub gross_margin: BigDecimal,
    pub actual_gross_margin: BigDecimal,
    pub variance: Option<ForecastVariance>,
}

impl ForecastSummary {
    pub fn empty(month: NaiveDate) -> Self {
        ForecastSummary {
            month,
            total_forecasted_hours: BigDecimal::zero(),
            total_actual_hours: BigDecimal::zero(),
            total_forecasted_cost: BigDecimal::zero(),
            total_actual_cost: BigDecimal::zero(),
            total_forecasted_revenue: BigDecimal::zero(),
            total_actual_revenue: BigDecimal::zero(),
            gross_margin: BigDecimal::zero(),
            actual_gross_margin: BigDecimal::zero(),
            variance: None,
        }
    }
}
