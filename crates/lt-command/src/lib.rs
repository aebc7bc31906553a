//! lt-command: the operator command path of lifttwin.
//!
//! The dashboard issues `start_pump` / `stop_pump` / `set_speed` against a
//! [`CommandInterface`], which is the authority on acceptance. The
//! [`SpeedCommandGate`] sits in front of `set_speed`: it enforces the
//! mechanical envelope, the running-state interlock, and one-command-at-a-
//! time mutual exclusion, and its `Idle → Sending → Idle` cycle is the only
//! state in the whole command path. A [`CommandWorker`] carries the dispatch
//! off-thread so telemetry ticks never block on an outstanding command.

pub mod error;
pub mod gate;
pub mod interface;
pub mod worker;

// Re-exports
pub use error::{CommandError, CommandResult};
pub use gate::{GateState, MAX_SETPOINT_RPM, MIN_SETPOINT_RPM, SpeedCommand, SpeedCommandGate};
pub use interface::{CommandInterface, IssuedCommand, SimulatedCommandInterface};
pub use worker::{CommandWorker, WorkerMessage};
