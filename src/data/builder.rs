use chrono::NaiveDate;
use rand::{distr::Alphanumeric, Rng};

use crate::data::*;

pub trait ProtocolBuilderExt {
    fn builder(medication: &str, start_date: NaiveDate) -> ProtocolBuilder;
}

impl ProtocolBuilderExt for DosingProtocol {
    fn builder(medication: &str, start_date: NaiveDate) -> ProtocolBuilder {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();

        ProtocolBuilder {
            id,
            medication: medication.to_string(),
            dose_amount: 0.0,
            frequency_per_week: 1.0,
            start_date,
            stop_date: None,
            half_life_hours: None,
            phase: None,
            is_archived: false,
        }
    }
}

/// Fluent construction of a [DosingProtocol]
///
/// Defaults to a weekly, ongoing protocol. When no half-life is given the
/// reference value from the [Medication] catalog is used.
pub struct ProtocolBuilder {
    id: String,
    medication: String,
    dose_amount: f64,
    frequency_per_week: f64,
    start_date: NaiveDate,
    stop_date: Option<NaiveDate>,
    half_life_hours: Option<f64>,
    phase: Option<Phase>,
    is_archived: bool,
}

impl ProtocolBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn dose(mut self, amount: f64) -> Self {
        self.dose_amount = amount;
        self
    }

    pub fn times_per_week(mut self, frequency: f64) -> Self {
        self.frequency_per_week = frequency;
        self
    }

    pub fn weekly(self) -> Self {
        self.times_per_week(1.0)
    }

    /// One dose every `days` days
    pub fn every_days(self, days: f64) -> Self {
        self.times_per_week(7.0 / days)
    }

    pub fn until(mut self, stop_date: NaiveDate) -> Self {
        self.stop_date = Some(stop_date);
        self
    }

    pub fn half_life_hours(mut self, hours: f64) -> Self {
        self.half_life_hours = Some(hours);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    pub fn build(self) -> Result<DosingProtocol, ProtocolError> {
        let half_life_hours = match self.half_life_hours {
            Some(hours) => hours,
            None => Medication::lookup(&self.medication)
                .map(|m| m.half_life_hours)
                .ok_or_else(|| ProtocolError::UnknownHalfLife {
                    medication: self.medication.clone(),
                })?,
        };
        let protocol = DosingProtocol {
            id: self.id,
            medication: self.medication,
            dose_amount: self.dose_amount,
            frequency_per_week: self.frequency_per_week,
            start_date: self.start_date,
            stop_date: self.stop_date,
            half_life_hours,
            phase: self.phase,
            is_archived: self.is_archived,
        };
        protocol.validate()?;
        Ok(protocol)
    }
}
