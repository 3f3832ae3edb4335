// vault-saga/src/saga/hooks.rs

//! Registration of actions and compensations for saga steps.

use tracing::{event, Level};

use crate::core::context_data::SagaContext;
use crate::core::step::{Action, Compensation};
use crate::error::SagaError;
use crate::saga::definition::Saga;
use std::future::Future;

impl<TData, Err> Saga<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<SagaError> + Send + Sync + 'static,
{
  /// Registers the forward action of `step_name`, replacing any earlier one.
  ///
  /// The action's own error type only has to convert into the saga's `Err`.
  pub fn on_step<F, UserErr>(
    &mut self,
    step_name: &str,
    action_fn: impl Fn(SagaContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let action: Action<TData, Err> = Box::new(move |ctx| {
      let user_fut = action_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.actions.insert(step_name.to_string(), action);
    event!(Level::TRACE, %step_name, "Action registered.");
  }

  /// Registers the undo action of `step_name`.
  ///
  /// It runs only when a later step fails after this step's action completed.
  pub fn compensate_with<F, UserErr>(
    &mut self,
    step_name: &str,
    compensation_fn: impl Fn(SagaContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let compensation: Compensation<TData, Err> = Box::new(move |ctx| {
      let user_fut = compensation_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.compensations.insert(step_name.to_string(), compensation);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.compensated = true;
    }
    event!(Level::TRACE, %step_name, "Compensation registered.");
  }
}
