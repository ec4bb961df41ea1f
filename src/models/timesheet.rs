use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged unit of work. Quarter-hour increments are enforced by the
/// timesheet form, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub task_id: Uuid,
    pub date: NaiveDate,
    pub hours: BigDecimal,
}
