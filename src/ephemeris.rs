//! # Ephemeris of a moving object at one epoch
//!
//! An [`Ephemeris`] is the apparent state of a moving object at a single epoch, TAI unless
//! it was computed for a request in another time scale (see [`Ephemeris::time_scale`]):
//! sky position, V magnitude, motion rates and a set of optional derived quantities
//! (filter magnitude, errors, signal-to-noise, elongation, Cartesian position).
//!
//! ## Update semantics
//!
//! [`Ephemeris::set_ephem`] **replaces** the whole state. Every optional field is reset to
//! the value carried by the [`EphemerisFields`] argument, which defaults to `None`. Calling
//! it with only the mandatory values therefore clears any optional value set previously.
//!
//! ## Geometry
//!
//! [`Ephemeris::is_in_field_of_view`] tests the membership of the object in a circular
//! field of view using the great-circle separation computed by [`angular_separation`].
//! All public angles are in degrees; radians are only used inside the trigonometry.
use hifitime::Epoch;
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Degree, Magnitude, DEGRAD, MJD, RADEG},
    movobj_errors::MovObjError,
    time_scale::TimeScale,
};

/// Optional fields of an [`Ephemeris`].
///
/// Built with struct update syntax:
///
/// ```rust
/// use movobj::ephemeris::EphemerisFields;
///
/// let fields = EphemerisFields {
///     distance: Some(1.2),
///     mag_filter: Some(20.5),
///     filter: Some("r".into()),
///     ..Default::default()
/// };
/// assert!(fields.snr.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisFields {
    /// Geocentric distance (AU)
    pub distance: Option<AstronomicalUnit>,
    /// Sky motion along RA (deg/day)
    pub dradt: Option<f64>,
    /// Sky motion along Dec (deg/day)
    pub ddecdt: Option<f64>,
    /// Rate of change of the geocentric distance (AU/day)
    pub ddistancedt: Option<f64>,
    /// Magnitude in the `filter` bandpass
    pub mag_filter: Option<Magnitude>,
    /// Filter identifier (u, g, r, i, z, y)
    pub filter: Option<String>,
    /// Photometric error
    pub mag_err: Option<Magnitude>,
    /// Magnitude handed to the image simulator
    pub mag_imsim: Option<Magnitude>,
    /// Astrometric error (arcsec)
    pub ast_err: Option<f64>,
    /// Signal-to-noise ratio
    pub snr: Option<f64>,
    /// Solar elongation (deg)
    pub solar_elongation: Option<Degree>,
    /// Cartesian position x (AU)
    pub cart_x: Option<f64>,
    /// Cartesian position y (AU)
    pub cart_y: Option<f64>,
    /// Cartesian position z (AU)
    pub cart_z: Option<f64>,
}

/// Read-only snapshot of the basic position returned by [`Ephemeris::position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    pub mjd_tai: MJD,
    pub ra: Degree,
    pub dec: Degree,
    pub dradt: Option<f64>,
    pub ddecdt: Option<f64>,
    pub mag_v: Magnitude,
}

/// Apparent state of a moving object at one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris {
    mjd_tai: MJD,
    ra: Degree,
    dec: Degree,
    mag_v: Magnitude,
    fields: EphemerisFields,
    timescale: TimeScale,
}

/// Great-circle separation between two sky positions (haversine formula).
///
/// Arguments
/// ---------
/// * `ra1`, `dec1`: first position (degrees)
/// * `ra2`, `dec2`: second position (degrees)
///
/// Return
/// ------
/// * The angular separation in degrees, in `[0, 180]`.
///
/// Note
/// ----
/// * RA wraparound is handled: a RA difference above 180° is folded to `360 - Δra`.
pub fn angular_separation(ra1: Degree, dec1: Degree, ra2: Degree, dec2: Degree) -> Degree {
    let delta_ra = wrapped_delta_ra(ra1, ra2);
    let delta_dec = (dec1 - dec2).abs();
    haversine(delta_ra, delta_dec, dec1, dec2)
}

/// Absolute RA difference folded into `[0, 180]`. RAs are assumed in `[0, 360)`.
fn wrapped_delta_ra(ra1: Degree, ra2: Degree) -> Degree {
    let delta_ra = (ra1 - ra2).abs();
    if delta_ra > 180.0 {
        360.0 - delta_ra
    } else {
        delta_ra
    }
}

fn haversine(delta_ra: Degree, delta_dec: Degree, dec1: Degree, dec2: Degree) -> Degree {
    let sin_half_ddec = (delta_dec * RADEG / 2.0).sin();
    let sin_half_dra = (delta_ra * RADEG / 2.0).sin();
    let val = sin_half_ddec.powi(2)
        + (dec1 * RADEG).cos() * (dec2 * RADEG).cos() * sin_half_dra.powi(2);
    // clamp against rounding above 1 for antipodal points
    2.0 * val.sqrt().min(1.0).asin() * DEGRAD
}

impl Ephemeris {
    /// Build a new ephemeris.
    ///
    /// Arguments
    /// -----------------
    /// * `mjd_tai`: epoch of the ephemeris (MJD, TAI)
    /// * `ra`: right ascension (degrees, `[0, 360)`)
    /// * `dec`: declination (degrees, `[-90, 90]`)
    /// * `mag_v`: V-band magnitude
    /// * `fields`: every optional quantity, `EphemerisFields::default()` for none
    pub fn new(
        mjd_tai: MJD,
        ra: Degree,
        dec: Degree,
        mag_v: Magnitude,
        fields: EphemerisFields,
    ) -> Self {
        Ephemeris {
            mjd_tai,
            ra,
            dec,
            mag_v,
            fields,
            timescale: TimeScale::TAI,
        }
    }

    /// Same ephemeris with its epoch read in `timescale` instead of TAI.
    ///
    /// Used for ephemerides computed from a request whose epochs are not TAI: the MJD is
    /// kept as requested and the scale travels with it.
    pub fn in_time_scale(mut self, timescale: TimeScale) -> Self {
        self.timescale = timescale;
        self
    }

    /// Set or update the ephemeris data.
    ///
    /// This is a full replacement: optional values absent from `fields` are cleared,
    /// never merged with the previous state, and the epoch is read as TAI again.
    pub fn set_ephem(
        &mut self,
        mjd_tai: MJD,
        ra: Degree,
        dec: Degree,
        mag_v: Magnitude,
        fields: EphemerisFields,
    ) {
        *self = Ephemeris::new(mjd_tai, ra, dec, mag_v, fields);
    }

    /// Return the very basics of the position.
    pub fn position(&self) -> SkyPosition {
        SkyPosition {
            mjd_tai: self.mjd_tai,
            ra: self.ra,
            dec: self.dec,
            dradt: self.fields.dradt,
            ddecdt: self.fields.ddecdt,
            mag_v: self.mag_v,
        }
    }

    /// Is the object inside a circular field of view?
    ///
    /// Arguments
    /// -----------------
    /// * `fov_ra`: RA of the field center (degrees, `[0, 360)`)
    /// * `fov_dec`: Dec of the field center (degrees, `[-90, 90]`)
    /// * `fov_radius`: radius of the field (degrees)
    ///
    /// Return
    /// ----------
    /// * `true` if the great-circle separation is strictly below `fov_radius`.
    ///   An object exactly on the boundary is outside.
    pub fn is_in_field_of_view(&self, fov_ra: Degree, fov_dec: Degree, fov_radius: Degree) -> bool {
        let delta_ra = wrapped_delta_ra(self.ra, fov_ra);
        let delta_dec = (self.dec - fov_dec).abs();
        if delta_dec > fov_radius {
            return false;
        }
        haversine(delta_ra, delta_dec, self.dec, fov_dec) < fov_radius
    }

    /// Update the V magnitude with variability information.
    ///
    /// Variability is not modelled yet: this always fails with
    /// [`MovObjError::NotImplemented`] and leaves `mag_v` untouched.
    pub fn set_variable_magnitude(
        &mut self,
        var_t0: MJD,
        var_timescale: f64,
        var_amplitude: f64,
    ) -> Result<(), MovObjError> {
        Err(MovObjError::NotImplemented(format!(
            "variable V magnitude (t0={var_t0}, timescale={var_timescale}, amplitude={var_amplitude})"
        )))
    }

    /// Signal-to-noise ratio of the object against a background limiting magnitude.
    ///
    /// `flux_ratio = 10^(0.4 (m5 - m_filter))` and `snr = 5 flux_ratio`. The result is
    /// stored in the ephemeris and returned.
    ///
    /// Arguments
    /// ---------
    /// * `background_five_sigma`: five-sigma limiting magnitude of the image
    ///
    /// Errors
    /// ------
    /// * [`MovObjError::Precondition`] if the filter magnitude has not been set.
    pub fn compute_snr(&mut self, background_five_sigma: Magnitude) -> Result<f64, MovObjError> {
        let mag_filter = self.fields.mag_filter.ok_or_else(|| {
            MovObjError::Precondition(
                "Need to calculate magnitude in filter bandpass first".into(),
            )
        })?;
        let flux_ratio = 10f64.powf(0.4 * (background_five_sigma - mag_filter));
        let snr = 5.0 * flux_ratio;
        self.fields.snr = Some(snr);
        Ok(snr)
    }

    /// Epoch of the ephemeris as a hifitime [`Epoch`], read in [`Ephemeris::time_scale`].
    ///
    /// Errors
    /// ------
    /// * [`MovObjError::UnsupportedTimeScale`] for an ephemeris computed in UT1.
    pub fn epoch(&self) -> Result<Epoch, MovObjError> {
        let scale = self
            .timescale
            .to_hifitime()
            .ok_or_else(|| MovObjError::UnsupportedTimeScale(self.timescale.to_string()))?;
        Ok(Epoch::from_mjd_in_time_scale(self.mjd_tai, scale))
    }

    /// Time scale of [`Ephemeris::mjd_tai`]; TAI unless computed for another scale.
    pub fn time_scale(&self) -> TimeScale {
        self.timescale
    }

    pub fn mjd_tai(&self) -> MJD {
        self.mjd_tai
    }

    pub fn ra(&self) -> Degree {
        self.ra
    }

    pub fn dec(&self) -> Degree {
        self.dec
    }

    pub fn mag_v(&self) -> Magnitude {
        self.mag_v
    }

    /// All optional quantities of the ephemeris.
    pub fn fields(&self) -> &EphemerisFields {
        &self.fields
    }

    pub fn distance(&self) -> Option<AstronomicalUnit> {
        self.fields.distance
    }

    pub fn dradt(&self) -> Option<f64> {
        self.fields.dradt
    }

    pub fn ddecdt(&self) -> Option<f64> {
        self.fields.ddecdt
    }

    pub fn mag_filter(&self) -> Option<Magnitude> {
        self.fields.mag_filter
    }

    pub fn filter(&self) -> Option<&str> {
        self.fields.filter.as_deref()
    }

    pub fn snr(&self) -> Option<f64> {
        self.fields.snr
    }
}

impl fmt::Display for Ephemeris {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MJD({}) {:.8}  RA {:.6}°  Dec {:+.6}°  V {:.3}",
            self.timescale, self.mjd_tai, self.ra, self.dec, self.mag_v
        )?;
        if let Some(d) = self.fields.distance {
            write!(f, "  Δ {d:.6} AU")?;
        }
        Ok(())
    }
}
