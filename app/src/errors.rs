// app/src/errors.rs

use eatzy::EatzyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Eatzy(#[from] EatzyError),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// A screen refused the action. The message is already user-facing.
  #[error("{0}")]
  Rejected(String),

  #[error("Usage Error: {0}")]
  Usage(String),

  #[error("Output Error: {0}")]
  Output(#[from] serde_json::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
