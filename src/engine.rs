//! # Propagation engine contract
//!
//! The orbit propagation and ephemeris generation are done by an external astrodynamics
//! engine. This module pins down the narrow interface used to talk to it:
//! one orbit record and a list of requested epochs go in, ephemeris rows and an integer
//! status come out.
//!
//! ## Array layouts
//!
//! The layouts are a frozen contract with the engine and must not be reordered.
//!
//! **Orbit record** ([`OrbitRecord`], one row of 12 fields):
//!
//! ```text
//! 0: object id
//! 1: q (AU)          2: e             3: i (rad)
//! 4: node (rad)      5: argPeri (rad) 6: timePeri (MJD)
//! 7: element type code (2 = cometary)
//! 8: epoch (MJD)     9: timescale code of the epoch (1=UTC, 2=UT1, 3=TT, 4=TAI)
//! 10: H              11: G
//! ```
//!
//! **Epoch requests** ([`EpochRequests`], N rows): `[epoch (MJD), timescale code]`.
//!
//! **Ephemeris rows** (one N×k matrix per orbit in [`EngineResponse::ephemerides`], k ≥ 8):
//!
//! ```text
//! 0: distance (AU)  1: RA (deg)  2: Dec (deg)  3: V magnitude
//! 6: dRA/dt (deg/day)  7: dDec/dt (deg/day)
//! ```
//!
//! Columns 4 and 5 (and any column past 7) are produced by the engine but not consumed.
//!
//! ## Implementing an engine
//!
//! Any closure with the right signature is an engine, which makes it easy to bind a
//! native library or to script responses in tests:
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use movobj::constants::ObsCode;
//! use movobj::engine::{EngineResponse, EpochRequests, OrbitRecord, PropagationEngine};
//!
//! let engine = |_orbit: &OrbitRecord, _obscode: ObsCode, dates: &EpochRequests| {
//!     EngineResponse::success(vec![DMatrix::zeros(dates.nrows(), 8)])
//! };
//! let dates = EpochRequests::from_fn(2, |r, c| if c == 0 { 54832.5 + r as f64 } else { 4.0 });
//! let response = engine.ephemeris(&OrbitRecord::zeros(), 807, &dates);
//! assert!(response.is_success());
//! ```
use nalgebra::{DMatrix, MatrixXx2, SMatrix};

use crate::constants::{ObsCode, ORBIT_RECORD_LEN};

/// Single-row orbit record handed to the engine.
pub type OrbitRecord = SMatrix<f64, 1, ORBIT_RECORD_LEN>;

/// Requested epochs, one `[epoch, timescale code]` row per epoch.
pub type EpochRequests = MatrixXx2<f64>;

/// Output of one engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResponse {
    /// One matrix per orbit record row, each with one row per requested epoch.
    pub ephemerides: Vec<DMatrix<f64>>,
    /// Engine status: 0 on success, engine-defined error code otherwise.
    pub status: i32,
}

impl EngineResponse {
    /// Successful response carrying the ephemeris rows.
    pub fn success(ephemerides: Vec<DMatrix<f64>>) -> Self {
        EngineResponse {
            ephemerides,
            status: 0,
        }
    }

    /// Failed response with an engine error code.
    pub fn failure(status: i32) -> Self {
        EngineResponse {
            ephemerides: Vec::new(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// External orbit propagation / ephemeris engine.
///
/// The call is synchronous and treated as deterministic given its inputs: no retry is
/// ever attempted on a nonzero status.
pub trait PropagationEngine {
    /// Compute the ephemerides of `orbits` seen from `obscode` at every requested epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `orbits`: the orbit record (angles in radians)
    /// * `obscode`: MPC observatory code
    /// * `dates`: requested epochs with their timescale codes
    ///
    /// Return
    /// ----------
    /// * An [`EngineResponse`]; `status != 0` signals a failure.
    fn ephemeris(
        &self,
        orbits: &OrbitRecord,
        obscode: ObsCode,
        dates: &EpochRequests,
    ) -> EngineResponse;
}

impl<F> PropagationEngine for F
where
    F: Fn(&OrbitRecord, ObsCode, &EpochRequests) -> EngineResponse,
{
    fn ephemeris(
        &self,
        orbits: &OrbitRecord,
        obscode: ObsCode,
        dates: &EpochRequests,
    ) -> EngineResponse {
        self(orbits, obscode, dates)
    }
}
