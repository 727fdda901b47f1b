use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Projection configuration
///
/// The horizon is passed in rather than read from the clock, so the same call can
/// be replayed for any simulated "today".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Last day ongoing protocols are projected through (inclusive)
    pub today: NaiveDate,
}

impl ProjectionOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Options for the local calendar day
    pub fn from_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Set the projection horizon
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for ProjectionOptions {
    /// Same as [ProjectionOptions::from_clock]
    fn default() -> Self {
        Self::from_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reads_clock_and_can_be_overridden() {
        let before = Local::now().date_naive();
        let options = ProjectionOptions::default();
        let after = Local::now().date_naive();
        assert!(options.today >= before && options.today <= after);

        let fixed = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(ProjectionOptions::default().with_today(fixed).today, fixed);
        assert_eq!(ProjectionOptions::default().with_today(fixed), ProjectionOptions::new(fixed));
    }
}
