//! Dose-schedule projection and active-level estimation for peptide medications
//!
//! Two pure computations sit at the core:
//!
//! - [`schedule`] expands recurring [`DosingProtocol`]s into dated [`DoseRecord`]s
//! - [`kinetics`] estimates the active amount of a medication at any instant from
//!   its dose history
//!
//! Neither reads the clock or touches storage. Callers load records, pass the query
//! instant or projection horizon explicitly, and persist whatever comes back.
//!
//! ```rust,ignore
//! use dosekit::prelude::*;
//!
//! let protocol = DosingProtocol::builder("semaglutide", start).dose(0.25).weekly().build()?;
//! let doses = rebuild(&[protocol], &history, &ProjectionOptions::new(today));
//! let history = DoseHistory::new(doses);
//! let level = history.active_level("semaglutide", now);
//! ```

pub mod data;
pub mod error;
pub mod kinetics;
pub mod schedule;

//extension traits
pub use crate::data::builder::{ProtocolBuilder, ProtocolBuilderExt};
pub use crate::data::*;
pub use crate::kinetics::ActiveLevel;
pub use error::DoseKitError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            DoseHistory, DoseRecord, DoseSource, DosingProtocol, Medication, Phase,
        };
    }
    pub mod kinetics {
        pub use crate::kinetics::{
            all_series, concentration, concentration_series, record_concentration, LevelPoint,
            LevelSummary, MedicationSeries, SeriesOptions, ABSORPTION_HOURS,
        };
    }
    pub mod schedule {
        pub use crate::schedule::{
            project, project_protocol, rebuild, schedule_dates, validate_protocols,
            ProjectionOptions,
        };
    }

    //extension traits
    pub use crate::data::builder::ProtocolBuilderExt;
    pub use crate::data::*;
    pub use crate::kinetics::{ActiveLevel, SeriesOptions};
    pub use crate::schedule::{project, rebuild, ProjectionOptions};
    pub use crate::DoseKitError;
}
