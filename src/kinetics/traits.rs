use chrono::NaiveDateTime;

use crate::data::DoseHistory;
use crate::kinetics::model::record_concentration;
use crate::kinetics::series::{concentration_series, LevelPoint, SeriesError, SeriesOptions};

/// Extension trait for estimating levels directly from a [`DoseHistory`]
///
/// # Example
///
/// ```rust,ignore
/// use dosekit::prelude::*;
///
/// let level = history.active_level("semaglutide", now);
/// let series = history.level_series("semaglutide", &SeriesOptions::daily(start, today))?;
/// ```
pub trait ActiveLevel {
    /// Estimated active amount of `medication` at `now`
    fn active_level(&self, medication: &str, now: NaiveDateTime) -> f64;

    /// Estimated level of `medication` across a window
    fn level_series(
        &self,
        medication: &str,
        options: &SeriesOptions,
    ) -> Result<Vec<LevelPoint>, SeriesError>;
}

impl ActiveLevel for DoseHistory {
    fn active_level(&self, medication: &str, now: NaiveDateTime) -> f64 {
        record_concentration(self.records(), medication, now)
    }

    fn level_series(
        &self,
        medication: &str,
        options: &SeriesOptions,
    ) -> Result<Vec<LevelPoint>, SeriesError> {
        concentration_series(self.records(), medication, options)
    }
}
