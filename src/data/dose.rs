use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [DoseRecord] is constructed from user input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoseError {
    #[error("medication name must not be empty")]
    EmptyMedication,
    #[error("dose amount must be positive and finite, got {0}")]
    InvalidAmount(f64),
    #[error("half-life must be positive and finite, got {0} hours")]
    InvalidHalfLife(f64),
}

/// Where a [DoseRecord] came from
///
/// Generated doses are cleared and re-projected whenever the protocol set changes,
/// manual entries are never touched by a rebuild.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoseSource {
    /// Logged by hand
    #[default]
    Manual,
    /// Expanded from a [crate::DosingProtocol]
    Protocol,
}

/// A single administered dose
///
/// The half-life is stored on the record itself, copied from the medication or
/// protocol at the time the dose was created. Editing a medication's reference
/// half-life later does not change how historical doses decay.
///
/// Deserialized records go through the same checks as [DoseRecord::new].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "StoredDoseRecord")]
pub struct DoseRecord {
    date: NaiveDate,
    medication: String,
    dose_amount: f64,
    half_life_hours: f64,
    #[serde(default)]
    source: DoseSource,
}

/// Unchecked shape of a [DoseRecord] as read from storage
#[derive(Deserialize)]
struct StoredDoseRecord {
    date: NaiveDate,
    medication: String,
    dose_amount: f64,
    half_life_hours: f64,
    #[serde(default)]
    source: DoseSource,
}

impl TryFrom<StoredDoseRecord> for DoseRecord {
    type Error = DoseError;

    fn try_from(stored: StoredDoseRecord) -> Result<Self, Self::Error> {
        let mut record = DoseRecord::new(
            stored.date,
            stored.medication,
            stored.dose_amount,
            stored.half_life_hours,
        )?;
        record.source = stored.source;
        Ok(record)
    }
}

impl DoseRecord {
    /// Create a manually logged dose
    ///
    /// # Arguments
    ///
    /// * `date` - Calendar day the dose was administered
    /// * `medication` - Name of the substance
    /// * `dose_amount` - Amount in milligrams, must be positive
    /// * `half_life_hours` - Elimination half-life in hours, must be positive
    pub fn new(
        date: NaiveDate,
        medication: impl Into<String>,
        dose_amount: f64,
        half_life_hours: f64,
    ) -> Result<Self, DoseError> {
        let medication = medication.into();
        if medication.trim().is_empty() {
            return Err(DoseError::EmptyMedication);
        }
        if !(dose_amount.is_finite() && dose_amount > 0.0) {
            return Err(DoseError::InvalidAmount(dose_amount));
        }
        if !(half_life_hours.is_finite() && half_life_hours > 0.0) {
            return Err(DoseError::InvalidHalfLife(half_life_hours));
        }
        Ok(DoseRecord {
            date,
            medication,
            dose_amount,
            half_life_hours,
            source: DoseSource::Manual,
        })
    }

    /// Build a generated record from values that were already validated on the protocol
    pub(crate) fn generated(
        date: NaiveDate,
        medication: &str,
        dose_amount: f64,
        half_life_hours: f64,
    ) -> Self {
        DoseRecord {
            date,
            medication: medication.to_string(),
            dose_amount,
            half_life_hours,
            source: DoseSource::Protocol,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn medication(&self) -> &str {
        &self.medication
    }

    /// Amount in milligrams
    pub fn dose_amount(&self) -> f64 {
        self.dose_amount
    }

    pub fn half_life_hours(&self) -> f64 {
        self.half_life_hours
    }

    pub fn source(&self) -> DoseSource {
        self.source
    }

    pub fn is_generated(&self) -> bool {
        self.source == DoseSource::Protocol
    }

    /// The instant the dose is considered administered: midnight of its date
    pub fn administered_at(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// Whether this record occupies the same `(date, medication)` slot as another
    pub fn same_slot(&self, date: NaiveDate, medication: &str) -> bool {
        self.date == date && self.medication == medication
    }
}

impl fmt::Display for DoseRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let source = match self.source {
            DoseSource::Manual => "manual",
            DoseSource::Protocol => "protocol",
        };
        write!(
            f,
            "{} {} {:.2} mg (t½ {:.1} h, {})",
            self.date, self.medication, self.dose_amount, self.half_life_hours, source
        )
    }
}
