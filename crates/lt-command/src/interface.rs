//! External pump command interface.

use std::collections::BTreeSet;
use std::sync::Mutex;

use lt_core::PumpId;

use crate::error::{CommandError, CommandResult};

/// Commands accepted by the station control layer.
///
/// The interface — not the gate in front of it — is the authority on
/// whether the physical or simulated pump accepts a value. Retry and
/// timeout policy also belong here, never to the callers.
pub trait CommandInterface {
    fn start_pump(&self, pump: PumpId) -> CommandResult<()>;

    fn stop_pump(&self, pump: PumpId) -> CommandResult<()>;

    /// Request a new speed setpoint. Blocks until the backend resolves.
    fn set_speed(&self, pump: PumpId, rpm: f64) -> CommandResult<()>;
}

/// Command accepted by the simulated backend, kept for inspection.
#[derive(Clone, Debug, PartialEq)]
pub enum IssuedCommand {
    Start(PumpId),
    Stop(PumpId),
    SetSpeed(PumpId, f64),
}

/// Reference backend for demos and tests.
///
/// Accepts commands for pumps it knows about and rejects the rest, so the
/// failure path of the gate stays exercisable without hardware.
#[derive(Debug)]
pub struct SimulatedCommandInterface {
    known: BTreeSet<PumpId>,
    issued: Mutex<Vec<IssuedCommand>>,
}

impl SimulatedCommandInterface {
    pub fn new(pumps: impl IntoIterator<Item = PumpId>) -> Self {
        Self {
            known: pumps.into_iter().collect(),
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Commands accepted so far, in order of arrival.
    pub fn issued(&self) -> Vec<IssuedCommand> {
        self.log().clone()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<IssuedCommand>> {
        // A poisoned log only ever means a panicking test thread; the data
        // itself is still valid.
        self.issued.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn accept(&self, pump: PumpId, command: IssuedCommand) -> CommandResult<()> {
        if !self.known.contains(&pump) {
            return Err(CommandError::Rejected {
                message: format!("unknown pump {pump}"),
            });
        }
        tracing::info!(pump = %pump, ?command, "command accepted");
        self.log().push(command);
        Ok(())
    }
}

impl CommandInterface for SimulatedCommandInterface {
    fn start_pump(&self, pump: PumpId) -> CommandResult<()> {
        self.accept(pump, IssuedCommand::Start(pump))
    }

    fn stop_pump(&self, pump: PumpId) -> CommandResult<()> {
        self.accept(pump, IssuedCommand::Stop(pump))
    }

    fn set_speed(&self, pump: PumpId, rpm: f64) -> CommandResult<()> {
        self.accept(pump, IssuedCommand::SetSpeed(pump, rpm))
    }
}
