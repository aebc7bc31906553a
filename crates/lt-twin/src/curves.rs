//! Affinity-law performance curves and the live operating point.

use lt_telemetry::PumpSnapshot;
use serde::Serialize;

use lt_core::numeric::non_negative;
use lt_core::units::constants::{G_MPS2, RHO_WATER_KGPM3};

use crate::design::PumpDesignSpec;
use crate::hydraulics::HydraulicState;

/// Number of samples in every generated curve.
pub const CURVE_POINT_COUNT: usize = 25;

/// Flow-axis spacing between samples (m³/h).
pub const FLOW_STEP_M3_H: f64 = 200.0;

/// Floor on the affinity speed ratio in the head scaling. Keeps a stopped
/// pump's curve visibly minimal instead of collapsing it to a zero line.
const MIN_HEAD_RPM_FACTOR: f64 = 0.1;

/// Droop coefficient of the head parabola.
const HEAD_DROOP: f64 = 0.4;

/// Friction-loss coefficient of the piping system curve (m per (m³/h)²).
const SYSTEM_LOSS_COEFF: f64 = 0.000002;

/// Floor on the efficiency divisor in the brake-power formula (%).
const MIN_POWER_EFF_PCT: f64 = 1.0;

/// Design reference the affinity laws scale from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurveConstants {
    /// Speed the nominal curve was measured at (rev/min).
    pub nominal_rpm: f64,
    /// Best-efficiency-point flow at nominal speed (m³/h).
    pub bep_flow_m3_h: f64,
    /// Shutoff-region maximum head at nominal speed (m).
    pub max_head_m: f64,
    /// Peak efficiency at the BEP (%).
    pub bep_efficiency_pct: f64,
}

impl Default for CurveConstants {
    /// Station-wide nominal reference: 1200 RPM, 2800 m³/h, 45 m, 84 %.
    fn default() -> Self {
        Self {
            nominal_rpm: 1200.0,
            bep_flow_m3_h: 2800.0,
            max_head_m: 45.0,
            bep_efficiency_pct: 84.0,
        }
    }
}

impl CurveConstants {
    /// Parameterize the curve from an asset's nameplate instead of the
    /// station-wide nominal reference, so two differently sized pumps no
    /// longer share one curve shape.
    pub fn from_design(spec: &PumpDesignSpec) -> Self {
        Self {
            nominal_rpm: spec.rated_rpm,
            bep_flow_m3_h: spec.design_flow_m3_h,
            // Nameplate head is quoted at the BEP; the parabola's shutoff
            // maximum sits 1/(1 - droop) above it, so the generated curve
            // passes through the nameplate duty point.
            max_head_m: spec.design_head_m / (1.0 - HEAD_DROOP),
            bep_efficiency_pct: spec.bep_efficiency_pct,
        }
    }
}

/// One sample of the four generated curves at a common flow abscissa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    pub flow_m3_h: f64,
    /// Affinity-scaled pump head (m), >= 0.
    pub head_m: f64,
    /// Affinity-scaled efficiency (%), >= 0.
    pub efficiency_pct: f64,
    /// Brake power to deliver this sample (kW), >= 0.
    pub power_kw: f64,
    /// Head demanded by the piping at this flow (m). May go negative when
    /// the static lift does.
    pub system_head_m: f64,
}

/// Live operating point, plotted straight from telemetry.
///
/// Deliberately not interpolated from the generated curve: the gap between
/// this marker and the theoretical curve is the diagnostic an operator
/// reads when a pump drifts off its affinity-law behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OperatingPoint {
    pub flow_m3_h: f64,
    pub head_m: f64,
    pub efficiency_pct: f64,
}

/// Generate the affinity-scaled pump, efficiency, and power curves plus the
/// piping system curve.
///
/// ## Model
///
/// With speed ratio `n = rpm / nominal_rpm`:
///
/// ```text
/// H_max(n) = H_max_nom * max(n, 0.1)²            (head ∝ speed²)
/// Q_bep(n) = Q_bep_nom * n                       (flow ∝ speed)
/// H(Q)     = H_max(n) * (1 - 0.4 (Q / Q_bep)²)
/// η(Q)     = η_bep * (1 - ((Q - Q_bep) / Q_bep)²)
/// P(Q)     = ρ g Q H / η                         (brake power; power ∝ speed³ follows)
/// H_sys(Q) = H_static + k Q²
/// ```
///
/// Negative head/efficiency samples floor to zero. The brake-power divisor
/// floors at 1 % efficiency so the shutoff region stays bounded. A stopped
/// pump has `Q_bep = 0`; its parabolas divide by 1 instead, keeping every
/// sample finite. The 0.1 speed-ratio floor applies to head scaling only —
/// `Q_bep` is left unfloored, and unifying the two guards would change the
/// published curve shape at low nonzero speed.
///
/// Returns exactly [`CURVE_POINT_COUNT`] samples with flow 0..4800 step 200,
/// fully determined by `(rpm, static_lift_m, constants)`.
pub fn generate(rpm: f64, static_lift_m: f64, constants: &CurveConstants) -> Vec<CurvePoint> {
    let rpm_factor = rpm / constants.nominal_rpm;
    let adjusted_max_head = constants.max_head_m * rpm_factor.max(MIN_HEAD_RPM_FACTOR).powi(2);
    let adjusted_bep_flow = constants.bep_flow_m3_h * rpm_factor;
    let divisor = bep_divisor(adjusted_bep_flow);

    let mut points = Vec::with_capacity(CURVE_POINT_COUNT);
    for i in 0..CURVE_POINT_COUNT {
        let flow = i as f64 * FLOW_STEP_M3_H;

        let head_m = non_negative(
            adjusted_max_head - adjusted_max_head * HEAD_DROOP * (flow / divisor).powi(2),
        );
        let efficiency_pct = non_negative(
            constants.bep_efficiency_pct * (1.0 - ((flow - adjusted_bep_flow) / divisor).powi(2)),
        );
        let power_kw = (flow * head_m * G_MPS2 * RHO_WATER_KGPM3)
            / (3600.0 * efficiency_pct.max(MIN_POWER_EFF_PCT) * 0.01 * 1000.0);
        let system_head_m = static_lift_m + SYSTEM_LOSS_COEFF * flow * flow;

        points.push(CurvePoint {
            flow_m3_h: flow,
            head_m,
            efficiency_pct,
            power_kw,
            system_head_m,
        });
    }
    points
}

/// Project the live telemetry onto the chart axes.
pub fn operating_point(snapshot: &PumpSnapshot, state: &HydraulicState) -> OperatingPoint {
    OperatingPoint {
        flow_m3_h: snapshot.flow_m3_h,
        head_m: state.head_m,
        efficiency_pct: state.efficiency_pct,
    }
}

// Divisor for the curve parabolas. Falls back to 1 for a stopped pump so
// every sample stays finite.
fn bep_divisor(adjusted_bep_flow: f64) -> f64 {
    if adjusted_bep_flow == 0.0 {
        1.0
    } else {
        adjusted_bep_flow
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_sample_is_finite_and_non_negative(
            rpm in 0.0_f64..2400.0,
            static_lift_m in -5.0_f64..15.0,
        ) {
            let curve = generate(rpm, static_lift_m, &CurveConstants::default());
            prop_assert_eq!(curve.len(), CURVE_POINT_COUNT);
            for point in &curve {
                prop_assert!(point.head_m.is_finite() && point.head_m >= 0.0);
                prop_assert!(point.efficiency_pct.is_finite() && point.efficiency_pct >= 0.0);
                prop_assert!(point.power_kw.is_finite() && point.power_kw >= 0.0);
                prop_assert!(point.system_head_m.is_finite());
            }
        }
    }
}
