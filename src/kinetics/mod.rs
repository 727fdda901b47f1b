//! Active-level estimation from a dose history
//!
//! The model is a visualization heuristic rather than a compartmental PK model:
//! each dose is absorbed linearly over a fixed 24 hour window and then decays
//! exponentially with its own half-life. Contributions of all doses are summed.
//!
//! | Elapsed since dose | Contribution |
//! |--------------------|--------------|
//! | `< 0` | `0` |
//! | `0 ..< 24 h` | `amount * elapsed / 24` |
//! | `>= 24 h` | `amount * exp(-ln 2 * (elapsed - 24) / t½)` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use dosekit::kinetics::{concentration, SeriesOptions};
//!
//! let level = concentration([(day0, 2.4)], 168.0, now);
//!
//! // One point per day, for charting
//! let series = history.level_series("semaglutide", &SeriesOptions::daily(start, today))?;
//! ```
//!
//! Half-lives must be positive. They are validated when a [`crate::DoseRecord`] or
//! [`crate::DosingProtocol`] is constructed, not on every evaluation.

mod model;
mod series;
mod traits;

pub use model::{concentration, dose_contribution, record_concentration, ABSORPTION_HOURS};
pub use series::{
    all_series, concentration_series, LevelPoint, LevelSummary, MedicationSeries, SeriesError,
    SeriesOptions,
};
pub use traits::ActiveLevel;
