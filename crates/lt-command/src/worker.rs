//! Background dispatch for speed commands.
//!
//! One worker per command: the interface call runs on its own thread and
//! the outcome comes back over a channel, so a telemetry tick arriving
//! while a `set_speed` is outstanding is never blocked behind it.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::thread::{self, JoinHandle};

use crate::error::CommandError;
use crate::gate::SpeedCommand;
use crate::interface::CommandInterface;

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Resolved {
        command: SpeedCommand,
    },
    Failed {
        command: SpeedCommand,
        error: CommandError,
    },
}

pub struct CommandWorker {
    pub outcome_rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

impl CommandWorker {
    /// Dispatch one validated command in the background.
    ///
    /// Exactly one [`WorkerMessage`] arrives on `outcome_rx`; the caller
    /// then calls [`SpeedCommandGate::complete`](crate::gate::SpeedCommandGate::complete).
    pub fn dispatch(
        interface: Arc<dyn CommandInterface + Send + Sync>,
        command: SpeedCommand,
    ) -> Self {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            tracing::debug!(
                pump = %command.pump,
                rpm = command.target_rpm,
                "dispatching set_speed"
            );
            let message = match interface.set_speed(command.pump, command.target_rpm) {
                Ok(()) => WorkerMessage::Resolved { command },
                Err(error) => WorkerMessage::Failed { command, error },
            };
            // The receiver may be gone if the caller lost interest.
            let _ = tx.send(message);
        });

        Self {
            outcome_rx: rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandResult;
    use crate::gate::SpeedCommandGate;
    use crate::interface::{IssuedCommand, SimulatedCommandInterface};
    use lt_core::PumpId;
    use lt_telemetry::PumpSnapshot;

    fn running_snapshot() -> PumpSnapshot {
        PumpSnapshot {
            flow_m3_h: 2500.0,
            discharge_pressure_bar: 1.5,
            rpm: 1145.0,
            power_kw: 145.0,
            wet_well_level_m: 4.2,
            is_running: true,
        }
    }

    #[test]
    fn dispatched_command_resolves_exactly_once() {
        let pump = PumpId::from_index(0);
        let backend = Arc::new(SimulatedCommandInterface::new([pump]));
        let mut gate = SpeedCommandGate::new(pump);

        let command = gate.begin(&running_snapshot(), 1100.0).unwrap();
        let worker = CommandWorker::dispatch(backend.clone(), command);

        let message = worker.outcome_rx.recv().unwrap();
        assert!(matches!(message, WorkerMessage::Resolved { .. }));
        gate.complete();

        assert_eq!(backend.issued(), vec![IssuedCommand::SetSpeed(pump, 1100.0)]);
        // No second outcome ever arrives.
        assert!(worker.outcome_rx.try_recv().is_err());
    }

    #[test]
    fn backend_failure_comes_back_as_failed_message() {
        let pump = PumpId::from_index(5);
        let backend = Arc::new(SimulatedCommandInterface::new([PumpId::from_index(0)]));
        let mut gate = SpeedCommandGate::new(pump);

        let command = gate.begin(&running_snapshot(), 900.0).unwrap();
        let worker = CommandWorker::dispatch(backend.clone(), command);

        match worker.outcome_rx.recv().unwrap() {
            WorkerMessage::Failed { error, .. } => {
                assert!(matches!(error, CommandError::Rejected { .. }));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        gate.complete();
        assert!(!gate.is_sending());
    }

    #[test]
    fn telemetry_is_not_blocked_by_an_outstanding_command() {
        struct StalledBackend;
        impl CommandInterface for StalledBackend {
            fn start_pump(&self, _pump: PumpId) -> CommandResult<()> {
                Ok(())
            }
            fn stop_pump(&self, _pump: PumpId) -> CommandResult<()> {
                Ok(())
            }
            fn set_speed(&self, _pump: PumpId, _rpm: f64) -> CommandResult<()> {
                std::thread::sleep(std::time::Duration::from_millis(50));
                Ok(())
            }
        }

        let pump = PumpId::from_index(0);
        let mut gate = SpeedCommandGate::new(pump);
        let command = gate.begin(&running_snapshot(), 1000.0).unwrap();
        let worker = CommandWorker::dispatch(Arc::new(StalledBackend), command);

        // While the command is in flight the main thread keeps processing
        // snapshots; only a second command is refused.
        assert!(gate.is_sending());
        let err = gate.begin(&running_snapshot(), 1050.0).unwrap_err();
        assert_eq!(err, CommandError::Busy);

        let message = worker.outcome_rx.recv().unwrap();
        assert!(matches!(message, WorkerMessage::Resolved { .. }));
        gate.complete();
    }
}
