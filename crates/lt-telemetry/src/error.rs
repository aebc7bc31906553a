//! Error types for telemetry ingest.

use thiserror::Error;

/// Errors raised at the telemetry boundary.
#[derive(Error, Debug, Clone)]
pub enum TelemetryError {
    #[error("Non-finite telemetry field: {what}")]
    NonFinite { what: &'static str },
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
