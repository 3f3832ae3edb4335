// vault-saga/src/core/outcome.rs

//! Results of a saga run.

use std::fmt;

/// A saga that ran every action to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SagaReport {
  pub completed_steps: Vec<String>,
}

/// A compensation that failed while unwinding. The state it should have
/// undone is still in place.
#[derive(Debug)]
pub struct CompensationFailure<Err> {
  pub step_name: String,
  pub error: Err,
}

/// A saga stopped by a failing action, after unwinding.
#[derive(Debug)]
pub struct SagaFailure<Err> {
  pub failed_step: String,
  pub error: Err,
  /// Steps whose compensation succeeded, in the order they were undone.
  pub compensated: Vec<String>,
  pub compensation_failures: Vec<CompensationFailure<Err>>,
}

impl<Err> SagaFailure<Err> {
  /// True if no compensation failed, i.e. nothing was left behind.
  pub fn is_clean(&self) -> bool {
    self.compensation_failures.is_empty()
  }

  pub fn into_error(self) -> Err {
    self.error
  }
}

impl<Err: fmt::Display> fmt::Display for SagaFailure<Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "step '{}' failed: {}", self.failed_step, self.error)?;
    if !self.is_clean() {
      write!(f, " ({} compensation(s) failed)", self.compensation_failures.len())?;
    }
    Ok(())
  }
}

impl<Err> std::error::Error for SagaFailure<Err>
where
  Err: std::error::Error + 'static,
{
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.error)
  }
}
