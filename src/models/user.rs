use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rate::RateHistory;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Annual salary for employees; contractors carry a direct cost-rate
    /// history instead and leave this unset.
    pub salary: Option<BigDecimal>,
    #[serde(default)]
    pub cost_rates: RateHistory,
}
