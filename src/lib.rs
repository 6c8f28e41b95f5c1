//! # movobj
//!
//! Single solar system moving object tracked by cometary orbital elements, with
//! time-tagged ephemerides computed by an external propagation engine.
//!
//! - [`orbit`] — cometary elements [`Orbit`](crate::orbit::Orbit)
//! - [`ephemeris`] — per-epoch apparent state and field-of-view geometry
//! - [`moving_object`] — orbit + ephemeris dictionary, engine orchestration
//! - [`engine`] — contract with the external propagation engine
pub mod constants;
pub mod engine;
pub mod ephemeris;
pub mod moving_object;
pub mod movobj_errors;
pub mod orbit;
pub mod time_scale;

pub use engine::{EngineResponse, PropagationEngine};
pub use ephemeris::{Ephemeris, EphemerisFields};
pub use moving_object::{epoch_key, EphemerisRequest, MovingObject, MovingObjectParams};
pub use movobj_errors::MovObjError;
pub use orbit::{ElementFormat, Orbit};
pub use time_scale::TimeScale;
