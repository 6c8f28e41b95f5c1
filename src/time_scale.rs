use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{constants::MJD, movobj_errors::MovObjError};

/// Time scales understood by the propagation engine.
///
/// The discriminant is the integer code written into the engine arrays
/// (orbit record column 9, and column 1 of each epoch request row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
pub enum TimeScale {
    UTC = 1,
    UT1 = 2,
    TT = 3,
    TAI = 4,
}

impl TimeScale {
    /// Integer code of the time scale, as a float ready for an engine array.
    pub fn code(&self) -> f64 {
        *self as i32 as f64
    }

    /// Decode an engine time scale code.
    ///
    /// Arguments
    /// ---------
    /// * `code`: integer code (1=UTC, 2=UT1, 3=TT, 4=TAI)
    ///
    /// Return
    /// ------
    /// * The matching [`TimeScale`] or [`MovObjError::UnknownTimeScale`]
    pub fn from_code(code: i32) -> Result<Self, MovObjError> {
        match code {
            1 => Ok(TimeScale::UTC),
            2 => Ok(TimeScale::UT1),
            3 => Ok(TimeScale::TT),
            4 => Ok(TimeScale::TAI),
            other => Err(MovObjError::UnknownTimeScale(other.to_string())),
        }
    }

    /// Matching hifitime time scale.
    ///
    /// UT1 has no direct counterpart: hifitime needs an Earth orientation
    /// provider to realize it, so `None` is returned.
    pub fn to_hifitime(self) -> Option<hifitime::TimeScale> {
        match self {
            TimeScale::UTC => Some(hifitime::TimeScale::UTC),
            TimeScale::UT1 => None,
            TimeScale::TT => Some(hifitime::TimeScale::TT),
            TimeScale::TAI => Some(hifitime::TimeScale::TAI),
        }
    }

    /// Express a hifitime epoch as a modified julian date in this time scale.
    ///
    /// Argument
    /// --------
    /// * `epoch`: the epoch to convert
    ///
    /// Return
    /// ------
    /// * the MJD in this scale, or [`MovObjError::UnsupportedTimeScale`] for UT1
    pub fn mjd_of(&self, epoch: &Epoch) -> Result<MJD, MovObjError> {
        match self {
            TimeScale::UTC => Ok(epoch.to_mjd_utc_days()),
            TimeScale::TT => Ok(epoch.to_mjd_tt_days()),
            TimeScale::TAI => Ok(epoch.to_mjd_tai_days()),
            TimeScale::UT1 => Err(MovObjError::UnsupportedTimeScale(self.to_string())),
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeScale::UTC => "UTC",
            TimeScale::UT1 => "UT1",
            TimeScale::TT => "TT",
            TimeScale::TAI => "TAI",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TimeScale {
    type Err = MovObjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTC" => Ok(TimeScale::UTC),
            "UT1" => Ok(TimeScale::UT1),
            "TT" => Ok(TimeScale::TT),
            "TAI" => Ok(TimeScale::TAI),
            _ => Err(MovObjError::UnknownTimeScale(s.to_string())),
        }
    }
}
