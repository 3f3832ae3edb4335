// vault-saga/src/saga/definition.rs

//! Contains the `Saga<TData, Err>` struct and its construction.

use crate::core::step::{Action, Compensation, StepDef};
use crate::error::SagaError;
use std::collections::HashMap;

/// An ordered list of steps over a root data type `TData`, whose actions and
/// compensations fail with `Err`.
///
/// `Err` must be `From<SagaError>` so engine-level failures (such as a step
/// declared without an action) surface as the same type as action failures.
pub struct Saga<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<SagaError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) actions: HashMap<String, Action<TData, Err>>,
  pub(crate) compensations: HashMap<String, Compensation<TData, Err>>,
}

impl<TData, Err> Saga<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<SagaError> + Send + Sync + 'static,
{
  /// Declares the steps in execution order.
  ///
  /// Panics on a duplicate step name; that is a setup error, not a runtime one.
  pub fn new(step_names: &[&str]) -> Self {
    let mut steps: Vec<StepDef> = Vec::with_capacity(step_names.len());
    for name in step_names {
      if steps.iter().any(|s| s.name == *name) {
        panic!("Saga setup error: step '{}' declared twice.", name);
      }
      steps.push(StepDef {
        name: (*name).to_string(),
        compensated: false,
      });
    }

    Self {
      steps,
      actions: HashMap::new(),
      compensations: HashMap::new(),
    }
  }

  pub fn steps(&self) -> &[StepDef] {
    &self.steps
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Saga setup error: step '{}' not found in saga definition.", step_name);
    }
  }
}
