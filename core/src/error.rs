// core/src/error.rs
use crate::flow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EatzyError {
  #[error("Remote service error: {0}")]
  Remote(String),

  #[error("HTTP transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Malformed response: {0}")]
  MalformedResponse(String),

  #[error("promotion not found")]
  PromotionNotFound,

  #[error("promotion found but does not belong to you")]
  PromotionNotOwned,

  #[error("cart is empty")]
  CartEmpty,

  #[error("only one promotion code allowed")]
  PromotionAlreadyApplied,

  #[error("not every cart item could be deleted ({deleted} of {expected})")]
  ClearCartIncomplete { deleted: usize, expected: usize },

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("no user is signed in")]
  NotSignedIn,

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Local store error: {0}")]
  Store(#[from] sqlx::Error),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for EatzyError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<EatzyError>() {
      Ok(inner) => inner,
      Err(err) => match err.downcast::<sqlx::Error>() {
        Ok(db_err) => EatzyError::Store(db_err),
        Err(other) => EatzyError::Internal(other.to_string()),
      },
    }
  }
}

impl From<serde_json::Error> for EatzyError {
  fn from(err: serde_json::Error) -> Self {
    EatzyError::MalformedResponse(err.to_string())
  }
}

impl EatzyError {
  /// Message suitable for showing on a screen.
  pub fn user_message(&self) -> String {
    self.to_string()
  }
}

pub type Result<T, E = EatzyError> = std::result::Result<T, E>;
