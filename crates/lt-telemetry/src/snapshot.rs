//! Typed pump telemetry record.

use serde::{Deserialize, Serialize};

/// One telemetry tick for a single pump, immutable once received.
///
/// Fields carry their unit in the name, matching what the station PLC
/// publishes. There are no implicit fallback defaults: a missing or garbage
/// value is the transport's problem to surface, never something the physics
/// papers over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PumpSnapshot {
    /// Volumetric flow at the discharge flange (m³/h), >= 0.
    pub flow_m3_h: f64,
    /// Gauge pressure at the discharge flange (bar), >= 0.
    pub discharge_pressure_bar: f64,
    /// Shaft speed (rev/min), >= 0.
    pub rpm: f64,
    /// Electrical power draw at the drive (kW), >= 0.
    pub power_kw: f64,
    /// Liquid level in the suction wet well (m), typically 0-10.
    pub wet_well_level_m: f64,
    /// Contactor state reported by the starter.
    pub is_running: bool,
}

impl PumpSnapshot {
    /// Snapshot for a pump at rest: no flow, no pressure, no draw.
    pub fn at_rest(wet_well_level_m: f64) -> Self {
        Self {
            flow_m3_h: 0.0,
            discharge_pressure_bar: 0.0,
            rpm: 0.0,
            power_kw: 0.0,
            wet_well_level_m,
            is_running: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_rest_draws_nothing() {
        let snap = PumpSnapshot::at_rest(3.1);
        assert_eq!(snap.flow_m3_h, 0.0);
        assert_eq!(snap.rpm, 0.0);
        assert_eq!(snap.power_kw, 0.0);
        assert_eq!(snap.wet_well_level_m, 3.1);
        assert!(!snap.is_running);
    }

    #[test]
    fn snapshot_parses_from_transport_json() {
        let json = r#"{
            "flow_m3_h": 2500.0,
            "discharge_pressure_bar": 1.5,
            "rpm": 1120.0,
            "power_kw": 145.0,
            "wet_well_level_m": 4.2,
            "is_running": true
        }"#;
        let snap: PumpSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.flow_m3_h, 2500.0);
        assert!(snap.is_running);
    }
}
