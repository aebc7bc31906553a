//! Hydraulic state derivation from raw telemetry.

use lt_telemetry::PumpSnapshot;
use serde::Serialize;

use lt_core::units::constants::M_H2O_PER_BAR;
use lt_core::units::{bar_to_pa, kw_to_w, m3h_to_m3s};

/// Elevation of the discharge main above the wet-well datum (m).
pub const DISCHARGE_ELEVATION_M: f64 = 12.0;

/// Physically meaningful quantities derived from one snapshot.
///
/// Recomputed on every tick, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HydraulicState {
    /// Total dynamic head equivalent of the discharge pressure (m H₂O).
    pub head_m: f64,
    /// Geometric lift the station must overcome at the current well level (m).
    pub static_lift_m: f64,
    /// Instantaneous hydraulic efficiency (%). Zero when no power is drawn.
    pub efficiency_pct: f64,
}

/// Derive head, static lift, and hydraulic efficiency from one snapshot.
///
/// ## Model
///
/// ```text
/// H          = p_discharge * 10.197          (bar → m H₂O, exact constant)
/// H_static   = z_discharge - z_well          (z_discharge = 12 m)
/// η          = Q · p / P_elec                (hydraulic power out / power in)
/// ```
///
/// with `Q` in m³/s, `p` in Pa, and `P_elec` in W. A pump drawing no power
/// has efficiency exactly 0 — "no efficiency when nothing is drawn" is a
/// domain decision, not a division error.
///
/// Deterministic, total, O(1). Input validation belongs to the telemetry
/// boundary, not here.
pub fn derive_state(snapshot: &PumpSnapshot) -> HydraulicState {
    let head_m = snapshot.discharge_pressure_bar * M_H2O_PER_BAR;
    let static_lift_m = DISCHARGE_ELEVATION_M - snapshot.wet_well_level_m;

    let flow_m3_s = m3h_to_m3s(snapshot.flow_m3_h);
    let pressure_pa = bar_to_pa(snapshot.discharge_pressure_bar);
    let power_w = kw_to_w(snapshot.power_kw);

    let efficiency_pct = if power_w > 0.0 {
        (flow_m3_s * pressure_pa / power_w) * 100.0
    } else {
        0.0
    };

    HydraulicState {
        head_m,
        static_lift_m,
        efficiency_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_snapshot() -> PumpSnapshot {
        PumpSnapshot {
            flow_m3_h: 2500.0,
            discharge_pressure_bar: 1.5,
            rpm: 1120.0,
            power_kw: 145.0,
            wet_well_level_m: 4.2,
            is_running: true,
        }
    }

    #[test]
    fn head_is_exact_bar_conversion() {
        for p in [0.0, 0.5, 1.5, 3.25] {
            let mut snap = scenario_snapshot();
            snap.discharge_pressure_bar = p;
            let state = derive_state(&snap);
            assert!((state.head_m - p * 10.197).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_power_means_zero_efficiency() {
        let mut snap = scenario_snapshot();
        snap.power_kw = 0.0;
        let state = derive_state(&snap);
        assert_eq!(state.efficiency_pct, 0.0);
    }

    #[test]
    fn at_rest_pump_derives_cleanly() {
        let state = derive_state(&PumpSnapshot::at_rest(4.2));
        assert_eq!(state.head_m, 0.0);
        assert_eq!(state.efficiency_pct, 0.0);
        assert!((state.static_lift_m - 7.8).abs() < 1e-12);
    }

    #[test]
    fn wastewater_duty_point_scenario() {
        let state = derive_state(&scenario_snapshot());

        // 1.5 bar → 15.2955 m head
        assert!((state.head_m - 15.2955).abs() < 1e-9);
        // 12 m main minus 4.2 m well level
        assert!((state.static_lift_m - 7.8).abs() < 1e-12);
        // (2500/3600 m³/s * 150000 Pa) / 145000 W ≈ 71.84 %
        assert!((state.efficiency_pct - 71.839).abs() < 1e-2);
    }

    #[test]
    fn derivation_is_deterministic() {
        let snap = scenario_snapshot();
        assert_eq!(derive_state(&snap), derive_state(&snap));
    }
}
