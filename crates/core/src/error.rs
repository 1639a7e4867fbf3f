use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by domain validation in trainer-admin
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, TrainerError>;
