pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use config::{OvertimeType, SystemConfig};
pub use engine::forecast::{
    aggregate_forecast, attach_variance, gross_margin, month_anchor, previous_month, summarize,
    summary_variance,
};
pub use engine::formula::calculate_cost_rate;
pub use engine::rates::resolve_rate;
pub use engine::timesheet::{actuals_from_entries, validate_hours};
pub use error::EngineError;
