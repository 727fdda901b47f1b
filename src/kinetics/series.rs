//! Time series of estimated levels, one point per step across a window
//!
//! This is the shape chart layers consume: the estimator evaluated on a regular
//! time axis. Series for several medications are computed in parallel.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{DoseHistory, DoseRecord};
use crate::kinetics::model::{record_concentration, MILLIS_PER_HOUR};

/// Errors in the series window configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series window ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("step must be positive and finite, got {0} hours")]
    InvalidStep(f64),
}

/// Window and resolution of a level series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesOptions {
    /// First sampled instant
    pub start: NaiveDateTime,
    /// Last instant that may be sampled (inclusive)
    pub end: NaiveDateTime,
    /// Hours between samples
    pub step_hours: f64,
}

impl SeriesOptions {
    /// One sample per day at midnight, from `start` through `end` inclusive
    pub fn daily(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
            step_hours: 24.0,
        }
    }

    /// Set the sampling step
    pub fn with_step_hours(mut self, step_hours: f64) -> Self {
        self.step_hours = step_hours;
        self
    }

    /// Move the end of the window
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = end;
        self
    }

    pub fn validate(&self) -> Result<(), SeriesError> {
        if !(self.step_hours.is_finite() && self.step_hours > 0.0) {
            return Err(SeriesError::InvalidStep(self.step_hours));
        }
        if self.end < self.start {
            return Err(SeriesError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Sample instants, each computed from `start` so long windows do not drift
    pub fn instants(&self) -> Result<Vec<NaiveDateTime>, SeriesError> {
        self.validate()?;
        let step_ms = (self.step_hours * MILLIS_PER_HOUR).round() as i64;
        if step_ms <= 0 {
            return Err(SeriesError::InvalidStep(self.step_hours));
        }
        let span_ms = (self.end - self.start).num_milliseconds();
        let n = span_ms / step_ms;
        Ok((0..=n)
            .map(|k| self.start + Duration::milliseconds(k * step_ms))
            .collect())
    }
}

/// Estimated level at one instant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LevelPoint {
    pub at: NaiveDateTime,
    pub level: f64,
}

/// Level series of a single medication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationSeries {
    pub medication: String,
    pub points: Vec<LevelPoint>,
}

impl MedicationSeries {
    pub fn summary(&self) -> Option<LevelSummary> {
        LevelSummary::from_points(&self.points)
    }
}

/// Peak, trough and final level of a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LevelSummary {
    /// Highest sampled level
    pub peak: f64,
    /// Instant of the first sample reaching the peak
    pub peak_at: NaiveDateTime,
    /// Lowest sampled level
    pub trough: f64,
    /// Instant of the first sample at the trough
    pub trough_at: NaiveDateTime,
    /// Level at the last sample of the window
    pub current: f64,
}

impl LevelSummary {
    /// `None` for an empty series
    pub fn from_points(points: &[LevelPoint]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        let mut peak = *first;
        let mut trough = *first;
        for point in &points[1..] {
            if point.level > peak.level {
                peak = *point;
            }
            if point.level < trough.level {
                trough = *point;
            }
        }
        Some(LevelSummary {
            peak: peak.level,
            peak_at: peak.at,
            trough: trough.level,
            trough_at: trough.at,
            current: last.level,
        })
    }
}

/// Evaluate the level of `medication` at every instant of the window
pub fn concentration_series(
    records: &[DoseRecord],
    medication: &str,
    options: &SeriesOptions,
) -> Result<Vec<LevelPoint>, SeriesError> {
    let instants = options.instants()?;
    let doses: Vec<&DoseRecord> = records
        .iter()
        .filter(|r| r.medication() == medication)
        .collect();

    Ok(instants
        .into_iter()
        .map(|at| LevelPoint {
            at,
            level: record_concentration(doses.iter().copied(), medication, at),
        })
        .collect())
}

/// One series per medication in the history, in first-seen order
pub fn all_series(
    history: &DoseHistory,
    options: &SeriesOptions,
) -> Result<Vec<MedicationSeries>, SeriesError> {
    options.validate()?;
    history
        .medications()
        .par_iter()
        .map(|medication| {
            let points = concentration_series(history.records(), medication, options)?;
            Ok(MedicationSeries {
                medication: medication.to_string(),
                points,
            })
        })
        .collect()
}
