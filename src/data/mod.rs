pub mod builder;
pub mod dose;
pub mod history;
pub mod medication;
pub mod protocol;
pub use dose::{DoseError, DoseRecord, DoseSource};
pub use history::DoseHistory;
pub use medication::Medication;
pub use protocol::{DosingProtocol, Phase, ProtocolError};
