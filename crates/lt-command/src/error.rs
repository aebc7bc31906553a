//! Error types for the command path.

use thiserror::Error;

/// Errors surfaced by the speed-command path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Invalid setpoint: {what}")]
    InvalidSetpoint { what: &'static str },

    #[error("Pump is not running")]
    NotRunning,

    #[error("A command is already in flight")]
    Busy,

    #[error("Command rejected by the pump interface: {message}")]
    Rejected { message: String },
}

pub type CommandResult<T> = Result<T, CommandError>;
