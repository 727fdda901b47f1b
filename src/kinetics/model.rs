//! Two-phase absorption/decay model
//!
//! Every dose ramps linearly from zero to its full amount over the first
//! [`ABSORPTION_HOURS`] after administration, then decays first-order with the
//! dose's half-life, referenced to the end of absorption. Doses are independent
//! and their contributions are summed.

use std::f64::consts::LN_2;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::DoseRecord;

/// Length of the linear absorption ramp, in hours
pub const ABSORPTION_HOURS: f64 = 24.0;

pub(crate) const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Contribution of a single dose `elapsed_hours` after administration
///
/// Future doses (`elapsed_hours < 0`) contribute nothing. `half_life_hours` must be
/// positive; it is not checked here.
pub fn dose_contribution(amount: f64, elapsed_hours: f64, half_life_hours: f64) -> f64 {
    if elapsed_hours < 0.0 {
        0.0
    } else if elapsed_hours < ABSORPTION_HOURS {
        amount * (elapsed_hours / ABSORPTION_HOURS)
    } else {
        let decay_hours = elapsed_hours - ABSORPTION_HOURS;
        amount * (-LN_2 * decay_hours / half_life_hours).exp()
    }
}

/// Hours from `from` to `to`, negative when `to` is earlier
pub(crate) fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Estimated active amount at `now` from a set of doses of one medication
///
/// # Arguments
/// * `doses` - `(administration date, amount)` pairs in any order; each dose is
///   taken as administered at midnight of its date
/// * `half_life_hours` - Elimination half-life shared by all doses, must be `> 0`
/// * `now` - Query instant
///
/// # Returns
/// The summed contribution in the same unit as the amounts. An empty input gives `0.0`.
pub fn concentration<I>(doses: I, half_life_hours: f64, now: NaiveDateTime) -> f64
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    doses
        .into_iter()
        .map(|(date, amount)| {
            let elapsed = hours_between(date.and_time(NaiveTime::MIN), now);
            dose_contribution(amount, elapsed, half_life_hours)
        })
        .sum()
}

/// Estimated active amount of `medication` at `now`, using each record's stored half-life
///
/// Records for other medications are ignored.
pub fn record_concentration<'a, I>(records: I, medication: &str, now: NaiveDateTime) -> f64
where
    I: IntoIterator<Item = &'a DoseRecord>,
{
    records
        .into_iter()
        .filter(|r| r.medication() == medication)
        .map(|r| {
            let elapsed = hours_between(r.administered_at(), now);
            dose_contribution(r.dose_amount(), elapsed, r.half_life_hours())
        })
        .sum()
}
