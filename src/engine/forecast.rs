//! Monthly forecast aggregation.
//!
//! Assignments carry forecasted and actual hours per reporting month; both
//! rate lookups anchor to the first day of that month. Missing reference
//! data degrades to zero-valued rates rather than an error — a project with
//! no sell rate yet is a normal business state.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{Datelike, Months, NaiveDate};
use log::{debug, warn};
use uuid::Uuid;

use crate::engine::rates::resolve_rate;
use crate::models::{
    Assignment, ForecastSummary, ForecastVariance, ProjectForecast, ProjectTask, User,
};

/// First day of the month containing `date`.
pub fn month_anchor(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month before the one containing `date`.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let anchor = month_anchor(date);
    anchor.checked_sub_months(Months::new(1)).unwrap_or(anchor)
}

/// Aggregate a month's assignments into per-project forecasts, ordered by
/// ascending project id. Empty input yields an empty list.
pub fn aggregate_forecast(
    assignments: &[Assignment],
    tasks: &HashMap<Uuid, ProjectTask>,
    users: &HashMap<Uuid, User>,
    month: NaiveDate,
) -> Vec<ProjectForecast> {
    let anchor = month_anchor(month);
    let mut by_project: BTreeMap<Uuid, ProjectForecast> = BTreeMap::new();

    for assignment in assignments {
        let forecast = by_project
            .entry(assignment.project_id)
            .or_insert_with(|| ProjectForecast::empty(assignment.project_id, anchor));

        let rates = resolve_assignment_rates(
            assignment.user_id,
            assignment.task_id,
            tasks,
            users,
            anchor,
        );

        forecast.total_forecasted_hours += assignment.forecasted_hours.clone();
        forecast.total_actual_hours += assignment.actual_hours.clone();
        forecast.total_forecasted_cost +=
            assignment.forecasted_hours.clone() * rates.cost_rate.clone();
        forecast.total_actual_cost += assignment.actual_hours.clone() * rates.cost_rate.clone();
        if rates.billable {
            forecast.total_forecasted_revenue +=
                assignment.forecasted_hours.clone() * rates.sell_rate.clone();
            forecast.total_actual_revenue +=
                assignment.actual_hours.clone() * rates.sell_rate.clone();
        }
    }

    let mut forecasts: Vec<ProjectForecast> = by_project.into_values().collect();
    for forecast in &mut forecasts {
        forecast.gross_margin = gross_margin(
            &forecast.total_forecasted_revenue,
            &forecast.total_forecasted_cost,
        );
        forecast.actual_gross_margin =
            gross_margin(&forecast.total_actual_revenue, &forecast.total_actual_cost);
    }

    debug!(
        "aggregated {} assignments into {} project forecasts for {}",
        assignments.len(),
        forecasts.len(),
        anchor
    );
    forecasts
}

/// `(revenue - cost) / revenue * 100` as a percentage rounded to two
/// decimals; zero when revenue is not positive.
pub fn gross_margin(revenue: &BigDecimal, cost: &BigDecimal) -> BigDecimal {
    if *revenue <= BigDecimal::zero() {
        return BigDecimal::zero();
    }
    let margin = (revenue.clone() - cost.clone()) / revenue.clone() * BigDecimal::from(100);
    margin.with_scale_round(2, RoundingMode::HalfUp)
}

pub(crate) struct ResolvedRates {
    pub sell_rate: BigDecimal,
    pub cost_rate: BigDecimal,
    pub billable: bool,
}

/// Sell rate comes from the task; cost rate from the task-level override
/// when one is present, else the user's history. Unknown references degrade
/// to zero rates — the hours still count.
pub(crate) fn resolve_assignment_rates(
    user_id: Uuid,
    task_id: Uuid,
    tasks: &HashMap<Uuid, ProjectTask>,
    users: &HashMap<Uuid, User>,
    as_of: NaiveDate,
) -> ResolvedRates {
    let task = tasks.get(&task_id);
    let user = users.get(&user_id);

    if task.is_none() {
        warn!("assignment references unknown task {}", task_id);
    }
    if user.is_none() {
        warn!("assignment references unknown user {}", user_id);
    }

    let sell_rate = task
        .map(|t| resolve_rate(&t.sell_rates, as_of))
        .unwrap_or_else(BigDecimal::zero);

    let cost_override = task
        .and_then(|t| t.cost_rates.as_ref())
        .filter(|history| !history.is_empty());
    let cost_rate = match cost_override {
        Some(history) => resolve_rate(history, as_of),
        None => user
            .map(|u| resolve_rate(&u.cost_rates, as_of))
            .unwrap_or_else(BigDecimal::zero),
    };

    ResolvedRates {
        sell_rate,
        cost_rate,
        billable: task.map(|t| t.billable).unwrap_or(false),
    }
}

/// Fill `variance` on each current-period forecast against the matching
/// project in the previous period. A project absent from the previous
/// period compares against zeros; never an error.
pub fn attach_variance(
    mut current: Vec<ProjectForecast>,
    previous: &[ProjectForecast],
) -> Vec<ProjectForecast> {
    for forecast in &mut current {
        let prior = previous
            .iter()
            .find(|p| p.project_id == forecast.project_id);
        forecast.variance = Some(variance_against(
            &forecast.total_forecasted_hours,
            &forecast.total_forecasted_cost,
            &forecast.total_forecasted_revenue,
            &forecast.gross_margin,
            prior.map(|p| {
                (
                    &p.total_forecasted_hours,
                    &p.total_forecasted_cost,
                    &p.total_forecasted_revenue,
                    &p.gross_margin,
                )
            }),
        ));
    }
    current
}

/// Fold a month's project forecasts into portfolio totals.
pub fn summarize(forecasts: &[ProjectForecast], month: NaiveDate) -> ForecastSummary {
    let mut summary = ForecastSummary::empty(month_anchor(month));
    for forecast in forecasts {
        summary.total_forecasted_hours += forecast.total_forecasted_hours.clone();
        summary.total_actual_hours += forecast.total_actual_hours.clone();
        summary.total_forecasted_cost += forecast.total_forecasted_cost.clone();
        summary.total_actual_cost += forecast.total_actual_cost.clone();
        summary.total_forecasted_revenue += forecast.total_forecasted_revenue.clone();
        summary.total_actual_revenue += forecast.total_actual_revenue.clone();
    }
    summary.gross_margin = gross_margin(
        &summary.total_forecasted_revenue,
        &summary.total_forecasted_cost,
    );
    summary.actual_gross_margin =
        gross_margin(&summary.total_actual_revenue, &summary.total_actual_cost);
    summary
}

/// Portfolio-level variance between two adjacent months.
pub fn summary_variance(
    current: &ForecastSummary,
    previous: &ForecastSummary,
) -> ForecastVariance {
    variance_against(
        &current.total_forecasted_hours,
        &current.total_forecasted_cost,
        &current.total_forecasted_revenue,
        &current.gross_margin,
        Some((
            &previous.total_forecasted_hours,
            &previous.total_forecasted_cost,
            &previous.total_forecasted_revenue,
            &previous.gross_margin,
        )),
    )
}

fn variance_against(
    hours: &BigDecimal,
    cost: &BigDecimal,
    revenue: &BigDecimal,
    gross_margin: &BigDecimal,
    previous: Option<(&BigDecimal, &BigDecimal, &BigDecimal, &BigDecimal)>,
) -> ForecastVariance {
    match previous {
        Some((prev_hours, prev_cost, prev_revenue, prev_margin)) => ForecastVariance {
            hours: hours.clone() - prev_hours.clone(),
            cost: cost.clone() - prev_cost.clone(),
            revenue: revenue.clone() - prev_revenue.clone(),
            gross_margin: gross_margin.clone() - prev_margin.clone(),
        },
        None => ForecastVariance {
            hours: hours.clone(),
            cost: cost.clone(),
            revenue: revenue.clone(),
            gross_margin: gross_margin.clone(),
        },
    }
}
