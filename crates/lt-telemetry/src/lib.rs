//! lt-telemetry: the telemetry boundary of lifttwin.
//!
//! The station transport (WebSocket plumbing, out of scope here) delivers one
//! [`PumpSnapshot`] per pump per tick at roughly 1 Hz. This crate holds the
//! typed snapshot record, the latest-value [`TelemetryStore`] consumers poll,
//! and a deterministic [`SimulatedFeed`] that stands in for the transport in
//! demos and tests.
//!
//! Validation happens here, at the boundary: the store rejects non-finite
//! fields on ingest so the physics downstream stays total and guard-free.

pub mod error;
pub mod feed;
pub mod snapshot;
pub mod store;

pub use error::{TelemetryError, TelemetryResult};
pub use feed::SimulatedFeed;
pub use snapshot::PumpSnapshot;
pub use store::{TelemetryRecord, TelemetrySource, TelemetryStore};
