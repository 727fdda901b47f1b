use thiserror::Error;

use crate::data::dose::DoseError;
use crate::data::protocol::ProtocolError;
use crate::kinetics::SeriesError;

#[derive(Error, Debug)]
pub enum DoseKitError {
    #[error("Invalid dose record: {0}")]
    Dose(#[from] DoseError),
    #[error("Invalid dosing protocol: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("Invalid series options: {0}")]
    Series(#[from] SeriesError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builder::ProtocolBuilderExt;
    use crate::data::{DoseRecord, DosingProtocol};
    use crate::kinetics::SeriesOptions;
    use chrono::NaiveDate;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn log_and_schedule(amount: f64, frequency: f64) -> Result<(), DoseKitError> {
        DoseRecord::new(jan(1), "semaglutide", amount, 168.0)?;
        DosingProtocol::builder("semaglutide", jan(1))
            .dose(0.25)
            .times_per_week(frequency)
            .build()?;
        SeriesOptions::daily(jan(1), jan(8)).validate()?;
        Ok(())
    }

    #[test]
    fn test_errors_convert() {
        assert!(log_and_schedule(0.25, 1.0).is_ok());
        assert!(matches!(
            log_and_schedule(-1.0, 1.0),
            Err(DoseKitError::Dose(DoseError::InvalidAmount(_)))
        ));
        let err = log_and_schedule(0.25, 0.0).unwrap_err();
        assert!(matches!(err, DoseKitError::Protocol(_)));
        assert!(err.to_string().starts_with("Invalid dosing protocol"));
    }
}
