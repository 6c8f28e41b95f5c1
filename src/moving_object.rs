//! # Moving object: orbit + ephemerides
//!
//! A [`MovingObject`] owns exactly one cometary [`Orbit`] and a dictionary of
//! [`Ephemeris`] keyed by epoch. It also carries the bookkeeping needed by source catalog
//! generation (identifiers, H-G magnitude parameters, variability, SED name, opposition
//! magnitudes), grouped in [`MovingObjectParams`].
//!
//! ## Epoch keys
//!
//! Floating-point epochs are never used as keys: two computations of "the same" MJD may
//! not compare equal. Every ephemeris is stored under [`epoch_key`], the epoch formatted
//! with exactly 8 fractional digits (`54832.5` → `"54832.50000000"`), and every lookup
//! goes through the same function. Epochs differing only past the 8th decimal share a key.
//!
//! ## Ephemeris generation
//!
//! [`MovingObject::calc_ephemeris`] converts the orbit into the engine record (degrees →
//! radians for `i`, `node`, `argPeri` only), builds one `[epoch, timescale]` request row
//! per epoch and calls the [`PropagationEngine`] **once** for the whole list. The update of
//! the ephemeris map is all-or-nothing: on any engine failure nothing is inserted.
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use movobj::constants::ObsCode;
//! use movobj::engine::{EngineResponse, EpochRequests, OrbitRecord};
//! use movobj::moving_object::{MovingObject, MovingObjectParams};
//! use movobj::orbit::Orbit;
//!
//! let orbit = Orbit::cometary(2.3, 0.15, 12.5, 80.0, 150.0, 54800.25, 54832.5);
//! let params = MovingObjectParams::builder().objid(42).mag_hv(15.2).build();
//! let mut obj = MovingObject::new(orbit, params);
//!
//! let engine = |_orbit: &OrbitRecord, _obscode: ObsCode, dates: &EpochRequests| {
//!     EngineResponse::success(vec![DMatrix::from_element(dates.nrows(), 8, 1.0)])
//! };
//! obj.calc_ephemeris(&engine, [54832.5, 54833.5]).unwrap();
//! assert!(obj.ephemeris_at(54833.5).is_some());
//! ```
use hifitime::Epoch;
use itertools::Itertools;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::{
    constants::{
        Degree, Magnitude, ObsCode, DEFAULT_MAG_HV, DEFAULT_OBSCODE, DEFAULT_PHASE_GV,
        ENGINE_COMETARY_CODE, EPH_COL_DDECDT, EPH_COL_DEC, EPH_COL_DISTANCE, EPH_COL_DRADT,
        EPH_COL_MAG_V, EPH_COL_RA, EPHEMERIS_ROW_MIN_LEN, EPOCH_KEY_DECIMALS, MAX_ENGINE_OBJID,
        MJD, RADEG,
    },
    engine::{EpochRequests, OrbitRecord, PropagationEngine},
    ephemeris::{Ephemeris, EphemerisFields},
    movobj_errors::MovObjError,
    orbit::{ElementFormat, Orbit},
    time_scale::TimeScale,
};

/// Format an MJD as the key of the ephemeris dictionary.
///
/// Argument
/// --------
/// * `mjd`: epoch of the ephemeris (MJD)
///
/// Return
/// ------
/// * the epoch as a decimal string with exactly 8 fractional digits
pub fn epoch_key(mjd: MJD) -> String {
    format!("{:.*}", EPOCH_KEY_DECIMALS, mjd)
}

/// Ordered list of epochs for an ephemeris request.
///
/// Built from a single epoch or from any sequence of epochs, so that
/// [`MovingObject::calc_ephemeris`] accepts both. Plain MJDs carry no time scale and
/// are read in the scale of the request; a list built from hifitime epochs remembers
/// the scale it was converted to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochList {
    mjds: SmallVec<[MJD; 8]>,
    scale: Option<TimeScale>,
}

impl EpochList {
    /// Convert hifitime epochs into MJDs expressed in `scale`.
    ///
    /// Errors
    /// ------
    /// * [`MovObjError::UnsupportedTimeScale`] for UT1.
    pub fn from_epochs(epochs: &[Epoch], scale: TimeScale) -> Result<Self, MovObjError> {
        let mjds = epochs
            .iter()
            .map(|epoch| scale.mjd_of(epoch))
            .collect::<Result<SmallVec<_>, _>>()?;
        Ok(EpochList {
            mjds,
            scale: Some(scale),
        })
    }

    fn from_mjds(mjds: SmallVec<[MJD; 8]>) -> Self {
        EpochList { mjds, scale: None }
    }

    pub fn len(&self) -> usize {
        self.mjds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mjds.is_empty()
    }

    pub fn as_slice(&self) -> &[MJD] {
        &self.mjds
    }

    /// Time scale the MJDs are expressed in, `None` for plain MJDs.
    pub fn time_scale(&self) -> Option<TimeScale> {
        self.scale
    }

    /// Time scale to tag the engine rows with.
    ///
    /// Errors
    /// ------
    /// * [`MovObjError::TimeScaleMismatch`] if the epochs were converted to another
    ///   scale than the one of the request.
    fn request_scale(&self, requested: TimeScale) -> Result<TimeScale, MovObjError> {
        match self.scale {
            Some(scale) if scale != requested => Err(MovObjError::TimeScaleMismatch {
                epochs: scale,
                request: requested,
            }),
            _ => Ok(requested),
        }
    }
}

impl From<MJD> for EpochList {
    fn from(mjd: MJD) -> Self {
        EpochList::from_mjds(SmallVec::from_slice(&[mjd]))
    }
}

impl From<&[MJD]> for EpochList {
    fn from(mjds: &[MJD]) -> Self {
        EpochList::from_mjds(SmallVec::from_slice(mjds))
    }
}

impl From<Vec<MJD>> for EpochList {
    fn from(mjds: Vec<MJD>) -> Self {
        EpochList::from_mjds(SmallVec::from_vec(mjds))
    }
}

impl From<&Vec<MJD>> for EpochList {
    fn from(mjds: &Vec<MJD>) -> Self {
        EpochList::from(mjds.as_slice())
    }
}

impl<const N: usize> From<[MJD; N]> for EpochList {
    fn from(mjds: [MJD; N]) -> Self {
        EpochList::from_mjds(SmallVec::from_slice(&mjds))
    }
}

/// Parameters of an ephemeris request.
///
/// Defaults: observatory 807, epochs in TAI, cometary elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisRequest {
    /// MPC observatory code of the observer
    pub obscode: ObsCode,
    /// Time scale of the requested epochs
    pub timescale: TimeScale,
    /// Element format sent to the engine, only COM is supported
    pub format: ElementFormat,
}

impl Default for EphemerisRequest {
    fn default() -> Self {
        EphemerisRequest {
            obscode: DEFAULT_OBSCODE,
            timescale: TimeScale::TAI,
            format: ElementFormat::Com,
        }
    }
}

/// Precomputed magnitudes at opposition in the LSST bands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OppositionMagnitudes {
    pub u: Option<Magnitude>,
    pub g: Option<Magnitude>,
    pub r: Option<Magnitude>,
    pub i: Option<Magnitude>,
    pub z: Option<Magnitude>,
    pub y: Option<Magnitude>,
}

/// Bookkeeping attached to a [`MovingObject`].
///
/// Values are stored verbatim; `index`, `n_par` and `moid` come from the orbit file and
/// are only carried along.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingObjectParams {
    pub objid: Option<u64>,
    pub objtype: Option<String>,
    /// Absolute magnitude H (V band)
    pub mag_hv: Magnitude,
    /// Slope parameter G (V band)
    pub phase_gv: f64,
    pub is_var: Option<bool>,
    /// Onset of the variability (MJD)
    pub var_t0: Option<MJD>,
    /// Period of the variability (days)
    pub var_timescale: Option<f64>,
    /// Max amplitude of the variability, in flux
    pub var_fluxmax: Option<f64>,
    pub sedname: Option<String>,
    pub opposition_mags: OppositionMagnitudes,
    pub index: Option<i64>,
    pub n_par: Option<i64>,
    pub moid: Option<f64>,
}

impl Default for MovingObjectParams {
    fn default() -> Self {
        MovingObjectParams {
            objid: None,
            objtype: None,
            mag_hv: DEFAULT_MAG_HV,
            phase_gv: DEFAULT_PHASE_GV,
            is_var: None,
            var_t0: None,
            var_timescale: None,
            var_fluxmax: None,
            sedname: None,
            opposition_mags: OppositionMagnitudes::default(),
            index: None,
            n_par: None,
            moid: None,
        }
    }
}

impl MovingObjectParams {
    /// Create a new [`MovingObjectParamsBuilder`] starting from the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use movobj::moving_object::MovingObjectParams;
    ///
    /// let params = MovingObjectParams::builder()
    ///     .objid(1001)
    ///     .objtype("NEO")
    ///     .mag_hv(18.4)
    ///     .sedname("C.dat")
    ///     .build();
    /// assert_eq!(params.phase_gv, 0.15);
    /// ```
    pub fn builder() -> MovingObjectParamsBuilder {
        MovingObjectParamsBuilder::new()
    }
}

/// Fluent builder for [`MovingObjectParams`].
#[derive(Debug, Clone, Default)]
pub struct MovingObjectParamsBuilder {
    params: MovingObjectParams,
}

impl MovingObjectParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: MovingObjectParams::default(),
        }
    }

    // --- Identification ---
    pub fn objid(mut self, v: u64) -> Self {
        self.params.objid = Some(v);
        self
    }
    pub fn objtype(mut self, v: impl Into<String>) -> Self {
        self.params.objtype = Some(v.into());
        self
    }

    // --- Magnitudes ---
    pub fn mag_hv(mut self, v: Magnitude) -> Self {
        self.params.mag_hv = v;
        self
    }
    pub fn phase_gv(mut self, v: f64) -> Self {
        self.params.phase_gv = v;
        self
    }
    pub fn opposition_mags(mut self, v: OppositionMagnitudes) -> Self {
        self.params.opposition_mags = v;
        self
    }
    pub fn sedname(mut self, v: impl Into<String>) -> Self {
        self.params.sedname = Some(v.into());
        self
    }

    // --- Variability ---
    pub fn variability(mut self, var_t0: MJD, var_timescale: f64, var_fluxmax: f64) -> Self {
        self.params.is_var = Some(true);
        self.params.var_t0 = Some(var_t0);
        self.params.var_timescale = Some(var_timescale);
        self.params.var_fluxmax = Some(var_fluxmax);
        self
    }
    pub fn is_var(mut self, v: bool) -> Self {
        self.params.is_var = Some(v);
        self
    }

    // --- Orbit file passthrough ---
    pub fn index(mut self, v: i64) -> Self {
        self.params.index = Some(v);
        self
    }
    pub fn n_par(mut self, v: i64) -> Self {
        self.params.n_par = Some(v);
        self
    }
    pub fn moid(mut self, v: f64) -> Self {
        self.params.moid = Some(v);
        self
    }

    pub fn build(self) -> MovingObjectParams {
        self.params
    }
}

/// A single solar system object: one orbit and its ephemerides.
#[derive(Debug, Clone)]
pub struct MovingObject {
    orbit: Orbit,
    ephemerides: HashMap<String, Ephemeris>,
    params: MovingObjectParams,
}

impl MovingObject {
    /// Create a moving object from an orbit and its bookkeeping parameters.
    ///
    /// The ephemeris dictionary starts empty.
    pub fn new(orbit: Orbit, params: MovingObjectParams) -> Self {
        MovingObject {
            orbit,
            ephemerides: HashMap::new(),
            params,
        }
    }

    /// Create a moving object directly from cometary elements.
    ///
    /// Arguments
    /// -----------------
    /// * `q`, `e`, `i`, `node`, `arg_peri`, `time_peri`, `epoch`: cometary elements
    ///   (AU, degrees, MJD)
    /// * `orb_timescale`: requested orbit timescale (pinned to TT, see [`Orbit::new`])
    /// * `params`: bookkeeping parameters
    ///
    /// Return
    /// ----------
    /// * The moving object, or the [`Orbit`] construction error.
    #[allow(clippy::too_many_arguments)]
    pub fn from_elements(
        q: f64,
        e: f64,
        i: Degree,
        node: Degree,
        arg_peri: Degree,
        time_peri: MJD,
        epoch: MJD,
        orb_timescale: TimeScale,
        params: MovingObjectParams,
    ) -> Result<Self, MovObjError> {
        let orbit = Orbit::new(
            q,
            e,
            i,
            node,
            arg_peri,
            time_peri,
            epoch,
            orb_timescale,
            ElementFormat::Com,
        )?;
        Ok(MovingObject::new(orbit, params))
    }

    /// Pack the orbit into the single-row record expected by the engine.
    ///
    /// Only `i`, `node` and `arg_peri` are converted to radians; `q`, `e` and `time_peri`
    /// stay in their native units. An absent object id is written as `0`.
    ///
    /// Errors
    /// ------
    /// * [`MovObjError::UnsupportedFormat`] unless `format` is [`ElementFormat::Com`].
    /// * [`MovObjError::Precondition`] if the object id exceeds [`MAX_ENGINE_OBJID`]:
    ///   the record is a float array and larger ids would reach the engine rounded.
    pub fn to_engine_orbit_record(&self, format: ElementFormat) -> Result<OrbitRecord, MovObjError> {
        format.ensure_cometary()?;

        let objid = self.params.objid.unwrap_or(0);
        if objid > MAX_ENGINE_OBJID {
            return Err(MovObjError::Precondition(format!(
                "object id {objid} does not fit exactly in the engine orbit record"
            )));
        }

        let orbit = &self.orbit;
        Ok(OrbitRecord::from_row_slice(&[
            objid as f64,
            orbit.q(),
            orbit.e(),
            orbit.i() * RADEG,
            orbit.node() * RADEG,
            orbit.arg_peri() * RADEG,
            orbit.time_peri(),
            ENGINE_COMETARY_CODE,
            orbit.epoch(),
            orbit.orb_timescale().code(),
            self.params.mag_hv,
            self.params.phase_gv,
        ]))
    }

    /// Compute ephemerides at one or several epochs with the default request
    /// (observatory 807, TAI epochs).
    ///
    /// See [`MovingObject::calc_ephemeris_with`].
    pub fn calc_ephemeris<E>(
        &mut self,
        engine: &E,
        epochs: impl Into<EpochList>,
    ) -> Result<(), MovObjError>
    where
        E: PropagationEngine + ?Sized,
    {
        self.calc_ephemeris_with(engine, epochs, &EphemerisRequest::default())
    }

    /// Compute ephemerides at one or several epochs and store them.
    ///
    /// The engine is called once for the whole epoch list. Row `j` of its answer becomes
    /// the [`Ephemeris`] of `epochs[j]`, stored under [`epoch_key`] and replacing any
    /// previous ephemeris at that key. An empty epoch list does nothing.
    ///
    /// Arguments
    /// -----------------
    /// * `engine`: the propagation engine
    /// * `epochs`: a single MJD or a sequence of MJDs, in `request.timescale`. A list
    ///   built with [`EpochList::from_epochs`] must use that same scale.
    /// * `request`: observatory, timescale and element format of the request
    ///
    /// Errors
    /// ----------
    /// * [`MovObjError::UnsupportedFormat`] before any engine call if the format is not COM.
    /// * [`MovObjError::TimeScaleMismatch`] before any engine call if the epochs were
    ///   converted to another scale than `request.timescale`.
    /// * [`MovObjError::EphemerisComputation`] with the engine status when it is nonzero.
    /// * [`MovObjError::MalformedEngineOutput`] when the rows do not match the request.
    ///
    /// In every error case the ephemeris dictionary is left exactly as it was.
    pub fn calc_ephemeris_with<E>(
        &mut self,
        engine: &E,
        epochs: impl Into<EpochList>,
        request: &EphemerisRequest,
    ) -> Result<(), MovObjError>
    where
        E: PropagationEngine + ?Sized,
    {
        let epochs: EpochList = epochs.into();
        let orbit_record = self.to_engine_orbit_record(request.format)?;
        let timescale = epochs.request_scale(request.timescale)?;
        if epochs.is_empty() {
            return Ok(());
        }

        let ts_code = timescale.code();
        let dates = EpochRequests::from_fn(epochs.len(), |row, col| {
            if col == 0 {
                epochs.as_slice()[row]
            } else {
                ts_code
            }
        });

        log::debug!(
            "computing {} ephemerides for object {:?} from observatory {}",
            epochs.len(),
            self.params.objid,
            request.obscode
        );
        let response = engine.ephemeris(&orbit_record, request.obscode, &dates);
        if !response.is_success() {
            log::warn!(
                "ephemeris engine failed for object {:?} with status {}",
                self.params.objid,
                response.status
            );
            return Err(MovObjError::EphemerisComputation(response.status));
        }

        let rows = match response.ephemerides.first() {
            Some(rows) => rows,
            None => {
                return Err(MovObjError::MalformedEngineOutput {
                    expected_rows: epochs.len(),
                    rows: 0,
                    columns: 0,
                })
            }
        };
        let computed = ephemerides_from_rows(epochs.as_slice(), timescale, rows)?;

        for (key, eph) in computed {
            if let Some(previous) = self.ephemerides.insert(key, eph) {
                log::debug!(
                    "ephemeris at MJD {} replaced for object {:?}",
                    epoch_key(previous.mjd_tai()),
                    self.params.objid
                );
            }
        }
        Ok(())
    }

    /// Ephemeris computed at `mjd`, looked up through [`epoch_key`].
    pub fn ephemeris_at(&self, mjd: MJD) -> Option<&Ephemeris> {
        self.ephemerides.get(&epoch_key(mjd))
    }

    /// Mutable access to the ephemeris computed at `mjd`, e.g. to compute its SNR.
    pub fn ephemeris_at_mut(&mut self, mjd: MJD) -> Option<&mut Ephemeris> {
        self.ephemerides.get_mut(&epoch_key(mjd))
    }

    pub fn has_ephemeris(&self, mjd: MJD) -> bool {
        self.ephemerides.contains_key(&epoch_key(mjd))
    }

    /// All ephemerides, keyed by [`epoch_key`].
    pub fn ephemerides(&self) -> &HashMap<String, Ephemeris> {
        &self.ephemerides
    }

    /// Stored epoch keys in increasing epoch order.
    pub fn epoch_keys(&self) -> Vec<&str> {
        self.ephemerides
            .iter()
            .sorted_by(|a, b| a.1.mjd_tai().total_cmp(&b.1.mjd_tai()))
            .map(|(key, _)| key.as_str())
            .collect_vec()
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    /// Replace the orbit of the object.
    ///
    /// Already computed ephemerides are kept as they are.
    pub fn set_orbit(&mut self, orbit: Orbit) {
        self.orbit = orbit;
    }

    pub fn params(&self) -> &MovingObjectParams {
        &self.params
    }

    pub fn objid(&self) -> Option<u64> {
        self.params.objid
    }

    pub fn objtype(&self) -> Option<&str> {
        self.params.objtype.as_deref()
    }

    pub fn mag_hv(&self) -> Magnitude {
        self.params.mag_hv
    }

    pub fn phase_gv(&self) -> f64 {
        self.params.phase_gv
    }

    pub fn sedname(&self) -> Option<&str> {
        self.params.sedname.as_deref()
    }
}

/// Turn the engine rows into keyed ephemerides, validating the whole matrix first.
fn ephemerides_from_rows(
    epochs: &[MJD],
    timescale: TimeScale,
    rows: &DMatrix<f64>,
) -> Result<Vec<(String, Ephemeris)>, MovObjError> {
    if rows.nrows() != epochs.len() || rows.ncols() < EPHEMERIS_ROW_MIN_LEN {
        return Err(MovObjError::MalformedEngineOutput {
            expected_rows: epochs.len(),
            rows: rows.nrows(),
            columns: rows.ncols(),
        });
    }

    Ok(epochs
        .iter()
        .enumerate()
        .map(|(j, &mjd)| {
            let eph = Ephemeris::new(
                mjd,
                rows[(j, EPH_COL_RA)],
                rows[(j, EPH_COL_DEC)],
                rows[(j, EPH_COL_MAG_V)],
                EphemerisFields {
                    distance: Some(rows[(j, EPH_COL_DISTANCE)]),
                    dradt: Some(rows[(j, EPH_COL_DRADT)]),
                    ddecdt: Some(rows[(j, EPH_COL_DDECDT)]),
                    ..Default::default()
                },
            )
            .in_time_scale(timescale);
            (epoch_key(mjd), eph)
        })
        .collect())
}

#[cfg(test)]
mod moving_object_test {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_object() -> MovingObject {
        let params = MovingObjectParams::builder()
            .objid(17)
            .mag_hv(15.5)
            .phase_gv(0.2)
            .build();
        MovingObject::from_elements(
            2.3,
            0.15,
            12.5,
            80.0,
            150.0,
            54800.25,
            54832.5,
            TimeScale::TT,
            params,
        )
        .unwrap()
    }

    #[test]
    fn test_epoch_key_format() {
        assert_eq!(epoch_key(54832.5), "54832.50000000");
        assert_eq!(epoch_key(54832.0), "54832.00000000");
        assert_eq!(epoch_key(54832.5), epoch_key(54832.5));
    }

    #[test]
    fn test_epoch_key_collides_past_eighth_decimal() {
        assert_eq!(epoch_key(54832.123456781), epoch_key(54832.123456784));
        assert_ne!(epoch_key(54832.12345678), epoch_key(54832.12345679));
    }

    #[test]
    fn test_epoch_key_absorbs_float_noise() {
        let summed = 54832.1 + 0.2;
        assert_eq!(epoch_key(summed), epoch_key(54832.3));
        assert_eq!(epoch_key(54832.3 - 1e-10), "54832.30000000");
    }

    #[test]
    fn test_epoch_list_conversions() {
        assert_eq!(EpochList::from(54832.5).as_slice(), &[54832.5]);
        assert_eq!(EpochList::from([1.0, 2.0, 3.0]).len(), 3);
        assert_eq!(EpochList::from(vec![1.0, 2.0]).as_slice(), &[1.0, 2.0]);
        let v = vec![4.0, 5.0];
        assert_eq!(EpochList::from(&v).as_slice(), &[4.0, 5.0]);
        assert!(EpochList::from(Vec::<f64>::new()).is_empty());
    }

    #[test]
    fn test_epoch_list_from_hifitime() {
        let epochs = [
            Epoch::from_mjd_in_time_scale(54832.5, hifitime::TimeScale::TAI),
            Epoch::from_mjd_in_time_scale(54833.5, hifitime::TimeScale::TAI),
        ];
        let list = EpochList::from_epochs(&epochs, TimeScale::TAI).unwrap();
        assert_relative_eq!(list.as_slice()[0], 54832.5, epsilon = 1e-9);
        assert_relative_eq!(list.as_slice()[1], 54833.5, epsilon = 1e-9);

        assert_eq!(
            EpochList::from_epochs(&epochs, TimeScale::UT1),
            Err(MovObjError::UnsupportedTimeScale("UT1".into()))
        );
    }

    #[test]
    fn test_engine_orbit_record_layout() {
        let obj = sample_object();
        let record = obj.to_engine_orbit_record(ElementFormat::Com).unwrap();

        assert_eq!(record[(0, 0)], 17.0);
        assert_eq!(record[(0, 1)], 2.3);
        assert_eq!(record[(0, 2)], 0.15);
        assert_relative_eq!(record[(0, 3)], 12.5_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(record[(0, 4)], 80.0_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(record[(0, 5)], 150.0_f64.to_radians(), epsilon = 1e-15);
        assert_eq!(record[(0, 6)], 54800.25);
        assert_eq!(record[(0, 7)], 2.0);
        assert_eq!(record[(0, 8)], 54832.5);
        assert_eq!(record[(0, 9)], 3.0);
        assert_eq!(record[(0, 10)], 15.5);
        assert_eq!(record[(0, 11)], 0.2);
    }

    #[test]
    fn test_engine_orbit_record_rejects_other_formats() {
        let obj = sample_object();
        assert_eq!(
            obj.to_engine_orbit_record(ElementFormat::Kep),
            Err(MovObjError::UnsupportedFormat("KEP".into()))
        );
    }

    #[test]
    fn test_engine_orbit_record_objid_range() {
        let mut obj = sample_object();
        obj.params.objid = Some(MAX_ENGINE_OBJID);
        let record = obj.to_engine_orbit_record(ElementFormat::Com).unwrap();
        assert_eq!(record[(0, 0)] as u64, MAX_ENGINE_OBJID);

        obj.params.objid = Some(MAX_ENGINE_OBJID + 1);
        assert!(matches!(
            obj.to_engine_orbit_record(ElementFormat::Com),
            Err(MovObjError::Precondition(_))
        ));

        obj.params.objid = None;
        let record = obj.to_engine_orbit_record(ElementFormat::Com).unwrap();
        assert_eq!(record[(0, 0)], 0.0);
    }

    #[test]
    fn test_epoch_list_scale() {
        assert_eq!(EpochList::from([1.0, 2.0]).time_scale(), None);
        let epochs = [Epoch::from_mjd_in_time_scale(
            54832.5,
            hifitime::TimeScale::TAI,
        )];
        let list = EpochList::from_epochs(&epochs, TimeScale::TT).unwrap();
        assert_eq!(list.time_scale(), Some(TimeScale::TT));
        assert_eq!(list.request_scale(TimeScale::TT), Ok(TimeScale::TT));
        assert_eq!(
            list.request_scale(TimeScale::TAI),
            Err(MovObjError::TimeScaleMismatch {
                epochs: TimeScale::TT,
                request: TimeScale::TAI
            })
        );
        assert_eq!(
            EpochList::from(1.0).request_scale(TimeScale::UTC),
            Ok(TimeScale::UTC)
        );
    }

    #[test]
    fn test_default_params() {
        let params = MovingObjectParams::default();
        assert_eq!(params.mag_hv, -99.9);
        assert_eq!(params.phase_gv, 0.15);
        assert_eq!(params.objid, None);
        assert_eq!(params.opposition_mags, OppositionMagnitudes::default());
    }

    #[test]
    fn test_builder_stores_values_verbatim() {
        let params = MovingObjectParams::builder()
            .objtype("MBA")
            .sedname("S.dat")
            .variability(54000.0, 0.3, 1.5)
            .opposition_mags(OppositionMagnitudes {
                r: Some(19.1),
                ..Default::default()
            })
            .index(3)
            .n_par(6)
            .moid(0.02)
            .build();
        assert_eq!(params.objtype.as_deref(), Some("MBA"));
        assert_eq!(params.is_var, Some(true));
        assert_eq!(params.var_t0, Some(54000.0));
        assert_eq!(params.var_timescale, Some(0.3));
        assert_eq!(params.var_fluxmax, Some(1.5));
        assert_eq!(params.opposition_mags.r, Some(19.1));
        assert_eq!(params.opposition_mags.g, None);
        assert_eq!(params.index, Some(3));
        assert_eq!(params.n_par, Some(6));
        assert_eq!(params.moid, Some(0.02));
    }

    #[test]
    fn test_from_elements_pins_timescale() {
        let obj = MovingObject::from_elements(
            2.3,
            0.15,
            12.5,
            80.0,
            150.0,
            54800.25,
            54832.5,
            TimeScale::UTC,
            MovingObjectParams::default(),
        )
        .unwrap();
        assert_eq!(obj.orbit().orb_timescale(), TimeScale::TT);
        assert!(obj.ephemerides().is_empty());
    }

    #[test]
    fn test_ephemerides_from_rows_rejects_short_rows() {
        let rows = DMatrix::zeros(2, 6);
        assert_eq!(
            ephemerides_from_rows(&[1.0, 2.0], TimeScale::TAI, &rows).unwrap_err(),
            MovObjError::MalformedEngineOutput {
                expected_rows: 2,
                rows: 2,
                columns: 6
            }
        );
    }

    #[test]
    fn test_request_default_and_serde() {
        let request = EphemerisRequest::default();
        assert_eq!(request.obscode, 807);
        assert_eq!(request.timescale, TimeScale::TAI);
        assert_eq!(request.format, ElementFormat::Com);

        let parsed: EphemerisRequest =
            serde_json::from_str(r#"{"obscode": 568, "timescale": "UTC"}"#).unwrap();
        assert_eq!(parsed.obscode, 568);
        assert_eq!(parsed.timescale, TimeScale::UTC);
        assert_eq!(parsed.format, ElementFormat::Com);
    }
}
