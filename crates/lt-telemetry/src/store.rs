//! Latest-value telemetry store.
//!
//! The transport pushes one snapshot per pump per tick; consumers poll the
//! most recent one. The store keeps no history — every derived quantity
//! downstream is recomputed from scratch off the latest snapshot, so stale
//! partial results never persist across ticks.

use std::collections::BTreeMap;

use lt_core::{PumpId, ensure_finite};

use crate::error::{TelemetryError, TelemetryResult};
use crate::snapshot::PumpSnapshot;

/// Pollable source of the most recent telemetry per pump.
///
/// Implemented by the in-process store here and by whatever transport
/// adapter a deployment wires in.
pub trait TelemetrySource {
    /// Most recent snapshot for `pump`, if any has been received.
    fn latest(&self, pump: PumpId) -> Option<PumpSnapshot>;
}

/// A received snapshot plus its receipt stamp.
#[derive(Clone, Debug)]
pub struct TelemetryRecord {
    pub snapshot: PumpSnapshot,
    /// RFC 3339 wall-clock stamp taken at ingest.
    pub received_at: String,
}

/// Latest-wins map of pump telemetry, keyed by pump id.
#[derive(Debug, Default)]
pub struct TelemetryStore {
    records: BTreeMap<PumpId, TelemetryRecord>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one snapshot, replacing whatever was stored for `pump`.
    ///
    /// This is the validation boundary: non-finite fields are rejected here
    /// so the derivation math never sees them.
    ///
    /// # Errors
    /// Returns `TelemetryError::NonFinite` naming the offending field; the
    /// previously stored record is left untouched.
    pub fn ingest(&mut self, pump: PumpId, snapshot: PumpSnapshot) -> TelemetryResult<()> {
        check_field(snapshot.flow_m3_h, "flow_m3_h")?;
        check_field(snapshot.discharge_pressure_bar, "discharge_pressure_bar")?;
        check_field(snapshot.rpm, "rpm")?;
        check_field(snapshot.power_kw, "power_kw")?;
        check_field(snapshot.wet_well_level_m, "wet_well_level_m")?;

        tracing::debug!(pump = %pump, rpm = snapshot.rpm, "telemetry ingested");

        self.records.insert(
            pump,
            TelemetryRecord {
                snapshot,
                received_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        Ok(())
    }

    /// Stored record (snapshot + receipt stamp) for `pump`.
    pub fn record(&self, pump: PumpId) -> Option<&TelemetryRecord> {
        self.records.get(&pump)
    }

    /// Pumps that have reported at least once, in id order.
    pub fn pump_ids(&self) -> Vec<PumpId> {
        self.records.keys().copied().collect()
    }
}

impl TelemetrySource for TelemetryStore {
    fn latest(&self, pump: PumpId) -> Option<PumpSnapshot> {
        self.records.get(&pump).map(|r| r.snapshot)
    }
}

fn check_field(value: f64, what: &'static str) -> TelemetryResult<()> {
    ensure_finite(value, what).map_err(|_| TelemetryError::NonFinite { what })?;
    Ok(())
}
