//! Deterministic simulated telemetry for the demo station.
//!
//! Stands in for the transport in demos and tests. Waveforms are plain
//! phase-offset sinusoids on the tick index, so the same tick always yields
//! the same snapshot — no clock, no RNG.

use lt_core::{LtError, LtResult, PumpId};

use crate::snapshot::PumpSnapshot;

/// Baseline operating point of the simulated drives.
const BASE_RPM: f64 = 1145.0;
const BASE_FLOW_M3_H: f64 = 2500.0;
const BASE_PRESSURE_BAR: f64 = 1.5;
const BASE_POWER_KW: f64 = 145.0;
const BASE_WELL_LEVEL_M: f64 = 4.2;

/// Synthetic telemetry for a small station.
///
/// When the station has more than one pump, the last one idles as standby so
/// stopped-pump code paths stay exercised end to end.
#[derive(Clone, Debug)]
pub struct SimulatedFeed {
    pump_count: u32,
}

impl SimulatedFeed {
    /// # Errors
    /// Rejects an empty station.
    pub fn new(pump_count: u32) -> LtResult<Self> {
        if pump_count == 0 {
            return Err(LtError::InvalidArg {
                what: "pump_count must be positive",
            });
        }
        Ok(Self { pump_count })
    }

    pub fn pump_count(&self) -> u32 {
        self.pump_count
    }

    /// Ids of the simulated pumps, in index order.
    pub fn pump_ids(&self) -> impl Iterator<Item = PumpId> + '_ {
        (0..self.pump_count).map(PumpId::from_index)
    }

    /// Snapshot for one pump at one tick.
    pub fn snapshot(&self, pump: PumpId, tick: u64) -> PumpSnapshot {
        // Wet well level is shared across the station.
        let level = BASE_WELL_LEVEL_M + 0.8 * (0.05 * tick as f64).sin();

        let standby = self.pump_count > 1 && pump.index() == self.pump_count - 1;
        if standby {
            return PumpSnapshot::at_rest(level);
        }

        let phase = f64::from(pump.index()) * 0.7;
        let wobble = (0.2 * tick as f64 + phase).sin();

        PumpSnapshot {
            flow_m3_h: BASE_FLOW_M3_H + 150.0 * wobble,
            discharge_pressure_bar: BASE_PRESSURE_BAR + 0.05 * wobble,
            rpm: BASE_RPM + 20.0 * wobble,
            power_kw: BASE_POWER_KW + 6.0 * wobble,
            wet_well_level_m: level,
            is_running: true,
        }
    }

    /// All snapshots for one tick, in pump-id order.
    pub fn tick(&self, tick: u64) -> Vec<(PumpId, PumpSnapshot)> {
        self.pump_ids()
            .map(|id| (id, self.snapshot(id, tick)))
            .collect()
    }
}
