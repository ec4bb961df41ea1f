pub mod forecast;
pub mod project;
pub mod rate;
pub mod timesheet;
pub mod user;

pub use forecast::{ForecastSummary, ForecastVariance, ProjectForecast};
pub use project::{Assignment, ProjectTask};
pub use rate::{RateEntry, RateHistory};
pub use timesheet::TimeEntry;
pub use user::User;
