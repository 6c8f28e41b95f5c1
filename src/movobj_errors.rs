use thiserror::Error;

use crate::time_scale::TimeScale;

#[derive(Error, Debug)]
pub enum MovObjError {
    #[error("Unsupported element format: {0} (only COM is supported)")]
    UnsupportedFormat(String),

    #[error("Error in generating ephemeris - errcode {0}")]
    EphemerisComputation(i32),

    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error(
        "Malformed engine output: expected {expected_rows} rows with at least 8 columns, got {rows}x{columns}"
    )]
    MalformedEngineOutput {
        expected_rows: usize,
        rows: usize,
        columns: usize,
    },

    #[error("Unknown time scale: {0}")]
    UnknownTimeScale(String),

    #[error("Time scale {0} cannot be converted without Earth orientation data")]
    UnsupportedTimeScale(String),

    #[error("Epochs are expressed in {epochs} but the request is tagged {request}")]
    TimeScaleMismatch {
        epochs: TimeScale,
        request: TimeScale,
    },
}

impl PartialEq for MovObjError {
    fn eq(&self, other: &Self) -> bool {
        use MovObjError::*;
        match (self, other) {
            (UnsupportedFormat(a), UnsupportedFormat(b)) => a == b,
            (EphemerisComputation(a), EphemerisComputation(b)) => a == b,
            (Precondition(a), Precondition(b)) => a == b,
            (NotImplemented(a), NotImplemented(b)) => a == b,
            (
                MalformedEngineOutput {
                    expected_rows: e1,
                    rows: r1,
                    columns: c1,
                },
                MalformedEngineOutput {
                    expected_rows: e2,
                    rows: r2,
                    columns: c2,
                },
            ) => e1 == e2 && r1 == r2 && c1 == c2,
            (UnknownTimeScale(a), UnknownTimeScale(b)) => a == b,
            (UnsupportedTimeScale(a), UnsupportedTimeScale(b)) => a == b,
            (
                TimeScaleMismatch {
                    epochs: e1,
                    request: r1,
                },
                TimeScaleMismatch {
                    epochs: e2,
                    request: r2,
                },
            ) => e1 == e2 && r1 == r2,
            _ => false,
        }
    }
}
