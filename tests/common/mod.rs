#![allow(dead_code)]

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use timecast::SystemConfig;
use timecast::models::{Assignment, ProjectTask, RateHistory, TimeEntry, User};

pub fn dec(s: &str) -> BigDecimal {
    s.parse().expect("valid decimal literal")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Builders for test fixtures.
pub struct MockData;

impl MockData {
    /// Config with all payroll fields present and zeroed percentages, so a
    /// bare `{salary}/52/38` formula evaluates cleanly.
    pub fn system_config(formula: &str) -> SystemConfig {
        SystemConfig {
            payroll_tax_percentage: Some(dec("0")),
            payroll_tax_free_threshold: Some(dec("0")),
            insurance_percentage: Some(dec("0")),
            superannuation_percentage: Some(dec("0")),
            cost_rate_formula: Some(formula.to_string()),
            ..SystemConfig::default()
        }
    }

    pub fn user(cost_rate: &str, from: NaiveDate) -> User {
        let mut cost_rates = RateHistory::new();
        cost_rates.add(from, dec(cost_rate));
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            salary: None,
            cost_rates,
        }
    }

    pub fn task(project_id: Uuid, billable: bool, sell_rate: &str, from: NaiveDate) -> ProjectTask {
        let mut sell_rates = RateHistory::new();
        sell_rates.add(from, dec(sell_rate));
        ProjectTask {
            id: Uuid::new_v4(),
            project_id,
            name: "Development".to_string(),
            billable,
            cost_rates: None,
            sell_rates,
        }
    }

    pub fn assignment(
        user: &User,
        task: &ProjectTask,
        forecasted_hours: &str,
        actual_hours: &str,
    ) -> Assignment {
        Assignment {
            user_id: user.id,
            project_id: task.project_id,
            task_id: task.id,
            forecasted_hours: dec(forecasted_hours),
            actual_hours: dec(actual_hours),
        }
    }

    pub fn time_entry(user: &User, task: &ProjectTask, on: NaiveDate, hours: &str) -> TimeEntry {
        TimeEntry {
            user_id: user.id,
            project_id: task.project_id,
            task_id: task.id,
            date: on,
            hours: dec(hours),
        }
    }
}
