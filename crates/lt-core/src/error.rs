use thiserror::Error;

pub type LtResult<T> = Result<T, LtError>;

#[derive(Error, Debug)]
pub enum LtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
