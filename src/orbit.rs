//! # Cometary orbit
//!
//! [`Orbit`] holds the cometary orbital elements `(q, e, i, Ω, ω, T)` of a single
//! moving object, together with the reference epoch of the element set.
//!
//! Units & conventions
//! --------------------
//! - Perihelion distance in **AU**, angles in **degrees**, epochs in **MJD**.
//! - Angles are only converted to radians when the orbit is packed into an engine record
//!   (see [`MovingObject::to_engine_orbit_record`](crate::moving_object::MovingObject::to_engine_orbit_record)).
//! - The element set is replaced wholesale through [`Orbit::set_elements`]; there is no
//!   per-element mutation.
//!
//! Only the cometary format ([`ElementFormat::Com`]) is accepted. The orbit timescale is
//! always TT, whatever the caller asks for, because the propagation engine reads cometary
//! elements in TT.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    constants::{AstronomicalUnit, Degree, MJD},
    movobj_errors::MovObjError,
    time_scale::TimeScale,
};

/// Orbital element formats known by the propagation engine.
///
/// Only [`ElementFormat::Com`] is supported by this crate; the other variants exist so that
/// callers asking for them get an explicit [`MovObjError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ElementFormat {
    /// Cartesian state vector
    Cart,
    /// Cometary elements `(q, e, i, Ω, ω, T)`
    #[default]
    Com,
    /// Keplerian elements `(a, e, i, Ω, ω, M)`
    Kep,
}

impl ElementFormat {
    /// Fail with [`MovObjError::UnsupportedFormat`] unless the format is cometary.
    pub fn ensure_cometary(&self) -> Result<(), MovObjError> {
        match self {
            ElementFormat::Com => Ok(()),
            other => Err(MovObjError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ElementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementFormat::Cart => "CART",
            ElementFormat::Com => "COM",
            ElementFormat::Kep => "KEP",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ElementFormat {
    type Err = MovObjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CART" => Ok(ElementFormat::Cart),
            "COM" => Ok(ElementFormat::Com),
            "KEP" => Ok(ElementFormat::Kep),
            _ => Err(MovObjError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Cometary orbital elements of a moving object.
///
/// Equality only looks at `(q, e, i, node, arg_peri, time_peri)`: two orbits with the same
/// shape and perihelion passage are equal even if their reference epochs differ.
#[derive(Debug, Clone)]
pub struct Orbit {
    q: AstronomicalUnit,
    e: f64,
    i: Degree,
    node: Degree,
    arg_peri: Degree,
    time_peri: MJD,
    epoch: MJD,
    orb_timescale: TimeScale,
}

impl Orbit {
    /// Build a new orbit from cometary elements.
    ///
    /// Arguments
    /// -----------------
    /// * `q`: perihelion distance (AU)
    /// * `e`: eccentricity
    /// * `i`: inclination (degrees)
    /// * `node`: longitude of the ascending node (degrees)
    /// * `arg_peri`: argument of perihelion (degrees)
    /// * `time_peri`: time of perihelion passage (MJD)
    /// * `epoch`: reference epoch of the elements (MJD)
    /// * `orb_timescale`: requested timescale, ignored and pinned to [`TimeScale::TT`]
    /// * `format`: must be [`ElementFormat::Com`]
    ///
    /// Return
    /// ----------
    /// * The orbit, or [`MovObjError::UnsupportedFormat`] for any other element format.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        q: AstronomicalUnit,
        e: f64,
        i: Degree,
        node: Degree,
        arg_peri: Degree,
        time_peri: MJD,
        epoch: MJD,
        orb_timescale: TimeScale,
        format: ElementFormat,
    ) -> Result<Self, MovObjError> {
        format.ensure_cometary()?;

        // The engine reads cometary elements in TT.
        if orb_timescale != TimeScale::TT {
            log::debug!(
                "orbit timescale {} requested for cometary elements, pinned to TT",
                orb_timescale
            );
        }

        Ok(Orbit::cometary(q, e, i, node, arg_peri, time_peri, epoch))
    }

    /// Build an orbit from cometary elements with the TT timescale.
    pub fn cometary(
        q: AstronomicalUnit,
        e: f64,
        i: Degree,
        node: Degree,
        arg_peri: Degree,
        time_peri: MJD,
        epoch: MJD,
    ) -> Self {
        Orbit {
            q,
            e,
            i,
            node,
            arg_peri,
            time_peri,
            epoch,
            orb_timescale: TimeScale::TT,
        }
    }

    /// Replace every element of the orbit at once.
    ///
    /// The validation is the same as in [`Orbit::new`]. On error the orbit is left untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn set_elements(
        &mut self,
        q: AstronomicalUnit,
        e: f64,
        i: Degree,
        node: Degree,
        arg_peri: Degree,
        time_peri: MJD,
        epoch: MJD,
        orb_timescale: TimeScale,
        format: ElementFormat,
    ) -> Result<(), MovObjError> {
        *self = Orbit::new(
            q,
            e,
            i,
            node,
            arg_peri,
            time_peri,
            epoch,
            orb_timescale,
            format,
        )?;
        Ok(())
    }

    /// Compare the elements against a possibly absent orbit.
    ///
    /// Return
    /// ----------
    /// * `false` when `other` is `None`, otherwise the element-wise equality of
    ///   `(q, e, i, node, arg_peri, time_peri)`.
    pub fn same_elements(&self, other: Option<&Orbit>) -> bool {
        match other {
            Some(o) => {
                self.q == o.q
                    && self.e == o.e
                    && self.i == o.i
                    && self.node == o.node
                    && self.arg_peri == o.arg_peri
                    && self.time_peri == o.time_peri
            }
            None => false,
        }
    }

    /// Propagate the elements to a new epoch.
    ///
    /// Propagation is not available yet; this always returns
    /// [`MovObjError::NotImplemented`] and leaves the orbit unchanged.
    pub fn propagate_to_epoch(&mut self, new_epoch: MJD) -> Result<(), MovObjError> {
        Err(MovObjError::NotImplemented(format!(
            "propagation of orbital elements to epoch {new_epoch}"
        )))
    }

    pub fn q(&self) -> AstronomicalUnit {
        self.q
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn i(&self) -> Degree {
        self.i
    }

    pub fn node(&self) -> Degree {
        self.node
    }

    pub fn arg_peri(&self) -> Degree {
        self.arg_peri
    }

    pub fn time_peri(&self) -> MJD {
        self.time_peri
    }

    pub fn epoch(&self) -> MJD {
        self.epoch
    }

    pub fn orb_timescale(&self) -> TimeScale {
        self.orb_timescale
    }
}

impl PartialEq for Orbit {
    fn eq(&self, other: &Self) -> bool {
        self.same_elements(Some(other))
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cometary Orbit @ epoch (MJD {}): {:.6}",
            self.orb_timescale, self.epoch
        )?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(f, "  q   (perihelion distance)     = {:.6} AU", self.q)?;
        writeln!(f, "  e   (eccentricity)            = {:.6}", self.e)?;
        writeln!(f, "  i   (inclination)             = {:.6}°", self.i)?;
        writeln!(f, "  Ω   (longitude of node)       = {:.6}°", self.node)?;
        writeln!(f, "  ω   (argument of perihelion)  = {:.6}°", self.arg_peri)?;
        write!(f, "  T   (time of perihelion)      = {:.6} MJD", self.time_peri)
    }
}
