//! Actuals from daily time entries.
//!
//! Unlike monthly assignments, daily entries resolve rates at the entry's
//! own date, so a mid-month rate change is reflected entry by entry.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::engine::forecast::{gross_margin, month_anchor, resolve_assignment_rates};
use crate::error::EngineError;
use crate::models::{ProjectForecast, ProjectTask, TimeEntry, User};

/// Negative hours are an input error, rejected before any aggregation.
/// Zero hours pass through.
pub fn validate_hours(hours: &BigDecimal) -> Result<(), EngineError> {
    if *hours < BigDecimal::zero() {
        return Err(EngineError::validation(format!(
            "hours must not be negative, got {}",
            hours
        )));
    }
    Ok(())
}

/// Roll a month's time entries into per-project actuals, ordered by
/// ascending project id. Entries dated outside the month are ignored.
/// Forecasted totals stay zero; pair with `aggregate_forecast` output for
/// forecast-versus-actual reporting.
pub fn actuals_from_entries(
    entries: &[TimeEntry],
    tasks: &HashMap<Uuid, ProjectTask>,
    users: &HashMap<Uuid, User>,
    month: NaiveDate,
) -> Result<Vec<ProjectForecast>, EngineError> {
    let anchor = month_anchor(month);
    let mut by_project: BTreeMap<Uuid, ProjectForecast> = BTreeMap::new();

    for entry in entries {
        validate_hours(&entry.hours)?;
        if month_anchor(entry.date) != anchor {
            continue;
        }

        let forecast = by_project
            .entry(entry.project_id)
            .or_insert_with(|| ProjectForecast::empty(entry.project_id, anchor));

        // Daily anchor: the entry's own date, not first-of-month.
        let rates = resolve_assignment_rates(entry.user_id, entry.task_id, tasks, users, entry.date);

        forecast.total_actual_hours += entry.hours.clone();
        forecast.total_actual_cost += entry.hours.clone() * rates.cost_rate.clone();
        if rates.billable {
            forecast.total_actual_revenue += entry.hours.clone() * rates.sell_rate.clone();
        }
    }

    let mut forecasts: Vec<ProjectForecast> = by_project.into_values().collect();
    for forecast in &mut forecasts {
        forecast.actual_gross_margin =
            gross_margin(&forecast.total_actual_revenue, &forecast.total_actual_cost);
    }

    debug!(
        "rolled {} time entries into {} project actuals for {}",
        entries.len(),
        forecasts.len(),
        anchor
    );
    Ok(forecasts)
}
