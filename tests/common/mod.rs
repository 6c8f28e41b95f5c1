use std::cell::{Cell, RefCell};

use nalgebra::DMatrix;

use movobj::constants::ObsCode;
use movobj::engine::{EngineResponse, EpochRequests, OrbitRecord, PropagationEngine};
use movobj::moving_object::{MovingObject, MovingObjectParams};
use movobj::orbit::Orbit;

/// Engine answering with deterministic rows derived from the requested epochs,
/// and recording every call it receives.
///
/// Row `j` for epoch `t` is `[dist, ra, dec, magV, 0, 0, dradt, ddecdt]` with
/// `dist = 1 + j/10`, `ra = (t - 54000) mod 360`, `dec = -10 + j`, `magV = 20 + j/100`,
/// `dradt = 0.25`, `ddecdt = -0.05`.
#[derive(Default)]
pub struct ScriptedEngine {
    pub status: i32,
    pub calls: Cell<usize>,
    pub last_obscode: Cell<Option<ObsCode>>,
    pub last_record: RefCell<Option<OrbitRecord>>,
    pub last_dates: RefCell<Option<EpochRequests>>,
}

impl ScriptedEngine {
    pub fn failing(status: i32) -> Self {
        ScriptedEngine {
            status,
            ..Default::default()
        }
    }
}

pub fn expected_row(epoch: f64, j: usize) -> [f64; 8] {
    let j = j as f64;
    [
        1.0 + j / 10.0,
        (epoch - 54000.0).rem_euclid(360.0),
        -10.0 + j,
        20.0 + j / 100.0,
        0.0,
        0.0,
        0.25,
        -0.05,
    ]
}

impl PropagationEngine for ScriptedEngine {
    fn ephemeris(
        &self,
        orbits: &OrbitRecord,
        obscode: ObsCode,
        dates: &EpochRequests,
    ) -> EngineResponse {
        self.calls.set(self.calls.get() + 1);
        self.last_obscode.set(Some(obscode));
        *self.last_record.borrow_mut() = Some(orbits.clone());
        *self.last_dates.borrow_mut() = Some(dates.clone());

        if self.status != 0 {
            return EngineResponse::failure(self.status);
        }

        let rows = DMatrix::from_fn(dates.nrows(), 8, |r, c| expected_row(dates[(r, 0)], r)[c]);
        EngineResponse::success(vec![rows])
    }
}

pub fn sample_orbit() -> Orbit {
    Orbit::cometary(2.3, 0.15, 12.5, 80.0, 150.0, 54800.25, 54832.5)
}

pub fn sample_object() -> MovingObject {
    let params = MovingObjectParams::builder()
        .objid(4242)
        .objtype("MBA")
        .mag_hv(16.1)
        .build();
    MovingObject::new(sample_orbit(), params)
}
