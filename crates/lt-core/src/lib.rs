//! lt-core: stable foundation for lifttwin.
//!
//! Contains:
//! - units (uom SI types + exact engineering conversions)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact pump identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LtError, LtResult};
pub use ids::PumpId;
pub use numeric::*;
pub use units::*;
