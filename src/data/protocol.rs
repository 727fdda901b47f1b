use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a [DosingProtocol] cannot be projected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("protocol {id}: frequency must be positive, got {value} per week")]
    InvalidFrequency { id: String, value: f64 },
    #[error("protocol {id}: dose amount must be positive, got {value}")]
    InvalidAmount { id: String, value: f64 },
    #[error("protocol {id}: half-life must be positive, got {value} hours")]
    InvalidHalfLife { id: String, value: f64 },
    #[error("protocol {id}: medication name must not be empty")]
    EmptyMedication { id: String },
    #[error("protocol {id}: stop date {stop} is before start date {start}")]
    StopBeforeStart {
        id: String,
        start: NaiveDate,
        stop: NaiveDate,
    },
    #[error("protocol for {medication}: no half-life given and medication is not in the catalog")]
    UnknownHalfLife { medication: String },
}

/// Informational tag on a protocol step
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A dose-escalation step
    Titration,
    /// Steady-state dosing
    Maintenance,
}

/// A recurring dosing rule from which concrete [crate::DoseRecord]s are projected
///
/// The interval between doses is `7 / frequency_per_week` days and need not be integral:
/// `2.0` means every 3.5 days, `0.5` means every two weeks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DosingProtocol {
    pub(crate) id: String,
    pub(crate) medication: String,
    pub(crate) dose_amount: f64,
    pub(crate) frequency_per_week: f64,
    pub(crate) start_date: NaiveDate,
    #[serde(default)]
    pub(crate) stop_date: Option<NaiveDate>,
    pub(crate) half_life_hours: f64,
    #[serde(default)]
    pub(crate) phase: Option<Phase>,
    #[serde(default)]
    pub(crate) is_archived: bool,
}

impl DosingProtocol {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn medication(&self) -> &str {
        &self.medication
    }

    /// Milligrams per administration
    pub fn dose_amount(&self) -> f64 {
        self.dose_amount
    }

    pub fn frequency_per_week(&self) -> f64 {
        self.frequency_per_week
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// `None` means the protocol is ongoing
    pub fn stop_date(&self) -> Option<NaiveDate> {
        self.stop_date
    }

    pub fn half_life_hours(&self) -> f64 {
        self.half_life_hours
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Days between consecutive doses
    pub fn interval_days(&self) -> f64 {
        7.0 / self.frequency_per_week
    }

    /// Last date doses may be projected on, given the current day
    ///
    /// Ongoing protocols never project past `today`.
    pub fn end_date(&self, today: NaiveDate) -> NaiveDate {
        self.stop_date.unwrap_or(today)
    }

    /// Mark the protocol as archived, keeping it for history only
    pub fn archive(&mut self) {
        self.is_archived = true;
    }

    pub fn set_stop_date(&mut self, stop_date: Option<NaiveDate>) {
        self.stop_date = stop_date;
    }

    /// Check the numeric and date preconditions the projector relies on
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.medication.trim().is_empty() {
            return Err(ProtocolError::EmptyMedication {
                id: self.id.clone(),
            });
        }
        if !(self.frequency_per_week.is_finite() && self.frequency_per_week > 0.0) {
            return Err(ProtocolError::InvalidFrequency {
                id: self.id.clone(),
                value: self.frequency_per_week,
            });
        }
        if !(self.dose_amount.is_finite() && self.dose_amount > 0.0) {
            return Err(ProtocolError::InvalidAmount {
                id: self.id.clone(),
                value: self.dose_amount,
            });
        }
        if !(self.half_life_hours.is_finite() && self.half_life_hours > 0.0) {
            return Err(ProtocolError::InvalidHalfLife {
                id: self.id.clone(),
                value: self.half_life_hours,
            });
        }
        if let Some(stop) = self.stop_date {
            if stop < self.start_date {
                return Err(ProtocolError::StopBeforeStart {
                    id: self.id.clone(),
                    start: self.start_date,
                    stop,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for DosingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stop = match self.stop_date {
            Some(date) => date.to_string(),
            None => "ongoing".to_string(),
        };
        write!(
            f,
            "Protocol {}: {} {:.2} mg x{} per week from {} to {}",
            self.id, self.medication, self.dose_amount, self.frequency_per_week, self.start_date, stop
        )?;
        if let Some(phase) = self.phase {
            write!(f, " ({:?})", phase)?;
        }
        if self.is_archived {
            write!(f, " [archived]")?;
        }
        Ok(())
    }
}
