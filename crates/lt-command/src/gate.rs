//! Operator speed-setpoint gate.
//!
//! Mediates a speed change from the dashboard's bounded input control to
//! the external command interface. Everything the gate enforces happens
//! before the interface ever sees the command: the mechanical envelope,
//! the running-state interlock, and one-command-at-a-time mutual exclusion.

use lt_core::PumpId;
use lt_telemetry::PumpSnapshot;

use crate::error::{CommandError, CommandResult};
use crate::interface::CommandInterface;

/// Published mechanical operating envelope of the drives (rev/min).
pub const MIN_SETPOINT_RPM: f64 = 600.0;
pub const MAX_SETPOINT_RPM: f64 = 1180.0;

/// Lifecycle of one speed command.
///
/// There is no distinct error state: failure comes back on the interface's
/// own error channel and the gate returns to `Idle` either way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateState {
    Idle,
    Sending { target_rpm: f64 },
}

/// A validated setpoint ready to hand to the command interface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedCommand {
    pub pump: PumpId,
    pub target_rpm: f64,
}

/// Per-pump speed-command gate: `Idle → Sending → Idle`.
///
/// The `Sending` state is the mutual-exclusion guard — a second setpoint
/// request while one is in flight is refused, not queued.
#[derive(Debug)]
pub struct SpeedCommandGate {
    pump: PumpId,
    state: GateState,
}

impl SpeedCommandGate {
    pub fn new(pump: PumpId) -> Self {
        Self {
            pump,
            state: GateState::Idle,
        }
    }

    pub fn pump(&self) -> PumpId {
        self.pump
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, GateState::Sending { .. })
    }

    /// Validate a requested setpoint and transition to `Sending`.
    ///
    /// Rejections happen here, before `set_speed` is ever invoked:
    /// - a command already in flight,
    /// - a pump that is not running on the current snapshot,
    /// - a setpoint outside `[600, 1180]` rev/min (rejected, not clamped —
    ///   the dashboard's input control is already bounded, so an
    ///   out-of-range value means a bug upstream).
    ///
    /// On success the returned [`SpeedCommand`] goes to a
    /// [`CommandWorker`](crate::worker::CommandWorker) or through
    /// [`dispatch_blocking`](Self::dispatch_blocking); the gate stays
    /// `Sending` until [`complete`](Self::complete).
    pub fn begin(
        &mut self,
        snapshot: &PumpSnapshot,
        target_rpm: f64,
    ) -> CommandResult<SpeedCommand> {
        if self.is_sending() {
            return Err(CommandError::Busy);
        }
        if !snapshot.is_running {
            return Err(CommandError::NotRunning);
        }
        if !target_rpm.is_finite() {
            return Err(CommandError::InvalidSetpoint {
                what: "setpoint must be finite",
            });
        }
        if target_rpm < MIN_SETPOINT_RPM {
            return Err(CommandError::InvalidSetpoint {
                what: "setpoint below the mechanical envelope",
            });
        }
        if target_rpm > MAX_SETPOINT_RPM {
            return Err(CommandError::InvalidSetpoint {
                what: "setpoint above the mechanical envelope",
            });
        }

        self.state = GateState::Sending { target_rpm };
        Ok(SpeedCommand {
            pump: self.pump,
            target_rpm,
        })
    }

    /// Return to `Idle` once the interface has resolved, success or failure.
    pub fn complete(&mut self) {
        self.state = GateState::Idle;
    }

    /// Convenience path: validate, invoke the interface inline, complete.
    pub fn dispatch_blocking(
        &mut self,
        interface: &dyn CommandInterface,
        snapshot: &PumpSnapshot,
        target_rpm: f64,
    ) -> CommandResult<()> {
        let command = self.begin(snapshot, target_rpm)?;
        let outcome = interface.set_speed(command.pump, command.target_rpm);
        self.complete();
        outcome
    }
}
