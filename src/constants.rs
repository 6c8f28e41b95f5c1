//! # Constants and type definitions for movobj
//!
//! Unit conversions, type aliases and the frozen column layout of the
//! propagation engine arrays.
//!
//! ## Overview
//!
//! - Degrees ↔ radians conversion factors
//! - Core type aliases used across the crate
//! - Default request values (observatory code, timescales)
//! - Positions of each field inside the engine orbit record and ephemeris rows

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle expressed in degrees
pub type Degree = f64;

/// Distance expressed in astronomical units
pub type AstronomicalUnit = f64;

/// Modified Julian Date
pub type MJD = f64;

/// Magnitude (V band or filter band)
pub type Magnitude = f64;

/// Numeric MPC observatory code as expected by the engine (e.g. 807 for Cerro Tololo)
pub type ObsCode = u32;

// -------------------------------------------------------------------------------------------------
// Defaults
// -------------------------------------------------------------------------------------------------

/// Default observatory used for ephemeris requests (Cerro Tololo)
pub const DEFAULT_OBSCODE: ObsCode = 807;

/// Default absolute magnitude H when none is known
pub const DEFAULT_MAG_HV: Magnitude = -99.9;

/// Default slope parameter G of the H-G magnitude system
pub const DEFAULT_PHASE_GV: f64 = 0.15;

/// Number of fractional digits in an ephemeris epoch key
pub const EPOCH_KEY_DECIMALS: usize = 8;

// -------------------------------------------------------------------------------------------------
// Engine layout
// -------------------------------------------------------------------------------------------------

/// Element type code understood by the engine for cometary elements
pub const ENGINE_COMETARY_CODE: f64 = 2.0;

/// Number of fields in one engine orbit record
pub const ORBIT_RECORD_LEN: usize = 12;

/// Largest object id the engine record carries exactly (ids travel as f64, 2^53)
pub const MAX_ENGINE_OBJID: u64 = 1 << 53;

/// Minimum number of columns in one engine ephemeris row
pub const EPHEMERIS_ROW_MIN_LEN: usize = 8;

/// Column of the geocentric distance (AU) in an engine ephemeris row
pub const EPH_COL_DISTANCE: usize = 0;
/// Column of the right ascension (deg)
pub const EPH_COL_RA: usize = 1;
/// Column of the declination (deg)
pub const EPH_COL_DEC: usize = 2;
/// Column of the V magnitude
pub const EPH_COL_MAG_V: usize = 3;
/// Column of the RA sky-motion rate (deg/day)
pub const EPH_COL_DRADT: usize = 6;
/// Column of the Dec rate (deg/day)
pub const EPH_COL_DDECDT: usize = 7;
