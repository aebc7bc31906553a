//! lt-twin: the pump hydraulic digital-twin engine.
//!
//! Two pure stages run on every telemetry tick:
//! 1. [`hydraulics::derive_state`] — snapshot → head, static lift, efficiency.
//! 2. [`curves::generate`] — shaft speed + static lift → affinity-scaled
//!    pump/efficiency/power curves plus the piping system curve, annotated
//!    with the live [`curves::OperatingPoint`].
//!
//! Both stages are deterministic, total functions with no state between
//! ticks. [`frame::tick`] chains them for one pump. Nameplate data lives in
//! [`design`] and can re-parameterize the curve per asset.

pub mod curves;
pub mod design;
pub mod frame;
pub mod hydraulics;

// Re-exports
pub use curves::{
    CURVE_POINT_COUNT, CurveConstants, CurvePoint, FLOW_STEP_M3_H, OperatingPoint, generate,
    operating_point,
};
pub use design::{
    DesignCatalog, DesignError, DesignResult, PumpDesignSpec, load_yaml, save_yaml,
    validate_catalog,
};
pub use frame::{TwinFrame, tick};
pub use hydraulics::{DISCHARGE_ELEVATION_M, HydraulicState, derive_state};
