//! Expansion of recurring dosing protocols into concrete dose records
//!
//! Projection is stateless: every call takes the protocols and the existing history
//! as input and returns records, it never stores anything. Two call shapes are
//! supported:
//!
//! - [`project`]: incremental, returns only doses not already in the history
//! - [`rebuild`]: full regeneration, drops every generated dose and returns the
//!   complete merged set
//!
//! # Usage
//!
//! ```rust,ignore
//! use dosekit::prelude::*;
//!
//! let protocol = DosingProtocol::builder("semaglutide", start)
//!     .dose(0.25)
//!     .weekly()
//!     .build()?;
//!
//! let options = ProjectionOptions::new(today);
//! let new_doses = project(&[protocol], history.records(), &options);
//! ```

mod projector;
mod types;

pub use projector::{project, project_protocol, rebuild, schedule_dates, validate_protocols};
pub use types::ProjectionOptions;
