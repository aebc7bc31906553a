//! One tick of the twin: derived state, curves, operating point.

use lt_telemetry::PumpSnapshot;
use serde::Serialize;

use crate::curves::{self, CurveConstants, CurvePoint, OperatingPoint};
use crate::hydraulics::{self, HydraulicState};

/// Everything the rendering layer needs for one pump on one tick.
#[derive(Clone, Debug, Serialize)]
pub struct TwinFrame {
    pub state: HydraulicState,
    pub curve: Vec<CurvePoint>,
    pub operating_point: OperatingPoint,
}

/// Run the full derivation pipeline for one snapshot.
///
/// State derivation feeds curve generation; nothing is carried between
/// ticks, so identical snapshots always yield identical frames.
pub fn tick(snapshot: &PumpSnapshot, constants: &CurveConstants) -> TwinFrame {
    let state = hydraulics::derive_state(snapshot);
    let curve = curves::generate(snapshot.rpm, state.static_lift_m, constants);
    let operating_point = curves::operating_point(snapshot, &state);

    TwinFrame {
        state,
        curve,
        operating_point,
    }
}
