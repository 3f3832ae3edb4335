// vault-saga/src/error.rs
use thiserror::Error;

/// Errors raised by the engine itself rather than by user actions.
///
/// A saga's error type `Err` must be `From<SagaError>` so that these can be
/// reported through the same channel as action failures.
#[derive(Debug, Error)]
pub enum SagaError {
  #[error("No action registered for step: {step_name}")]
  ActionMissing { step_name: String },

  #[error("Saga context is still shared by {handles} handles")]
  ContextShared { handles: usize },
}

pub type SagaResult<T, E = SagaError> = std::result::Result<T, E>;
