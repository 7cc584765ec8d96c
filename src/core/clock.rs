//! Source of "today" for metrics and sample data

use chrono::{Local, NaiveDate};

/// Where the current calendar date comes from
///
/// Production code uses the local system date; tests pin a fixed date so
/// that date-dependent metrics are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
