pub mod forecast;
pub mod formula;
pub mod rates;
pub mod timesheet;
