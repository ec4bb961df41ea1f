use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rate::RateHistory;

/// Billing unit within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub billable: bool,
    /// Task-level cost override; falls back to the user's cost history
    /// when absent or empty.
    #[serde(default)]
    pub cost_rates: Option<RateHistory>,
    #[serde(default)]
    pub sell_rates: RateHistory,
}

/// Links a user to a task for one reporting month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub task_id: Uuid,
    pub forecasted_hours: BigDecimal,
    pub actual_hours: BigDecimal,
}
