// vault-saga/src/saga/execution.rs

//! Contains `Saga::run()`, which executes the actions in order and unwinds
//! completed steps when one of them fails.

use crate::core::context_data::SagaContext;
use crate::core::outcome::{CompensationFailure, SagaFailure, SagaReport};
use crate::error::SagaError;
use crate::saga::definition::Saga;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Saga<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<SagaError> + Send + Sync + 'static,
{
  /// Executes every step's action against `ctx`, in declaration order.
  ///
  /// On the first failing action the compensations of the completed steps run
  /// in reverse order and the failure is returned. A step with no registered
  /// action fails with `SagaError::ActionMissing`.
  #[instrument(
    name = "Saga::run",
    skip_all,
    fields(
      saga_context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    )
  )]
  pub async fn run(&self, ctx: SagaContext<TData>) -> Result<SagaReport, SagaFailure<Err>> {
    event!(Level::DEBUG, "Saga execution starting.");
    let mut completed: Vec<&str> = Vec::with_capacity(self.steps.len());

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      let Some(action) = self.actions.get(step_name) else {
        event!(Level::ERROR, %step_name, "Step has no action.");
        let error = Err::from(SagaError::ActionMissing {
          step_name: step_def.name.clone(),
        });
        return Err(self.unwind(&ctx, &completed, step_name, error).await);
      };

      let step_span = span!(Level::INFO, "saga_step", step_name, step_index = step_idx);
      match action(ctx.clone()).instrument(step_span).await {
        Ok(()) => {
          event!(Level::DEBUG, %step_name, "Step completed.");
          completed.push(step_name);
        }
        Err(e) => {
          event!(Level::WARN, %step_name, error = %e, "Step failed, unwinding completed steps.");
          return Err(self.unwind(&ctx, &completed, step_name, e).await);
        }
      }
    }

    event!(Level::DEBUG, "Saga execution completed successfully.");
    Ok(SagaReport {
      completed_steps: completed.into_iter().map(str::to_string).collect(),
    })
  }

  async fn unwind(&self, ctx: &SagaContext<TData>, completed: &[&str], failed_step: &str, error: Err) -> SagaFailure<Err> {
    let mut compensated = Vec::new();
    let mut compensation_failures = Vec::new();

    for step_name in completed.iter().rev() {
      let Some(compensation) = self.compensations.get(*step_name) else {
        event!(Level::TRACE, %step_name, "No compensation for step.");
        continue;
      };

      let comp_span = span!(Level::INFO, "saga_compensation", step_name = *step_name);
      match compensation(ctx.clone()).instrument(comp_span).await {
        Ok(()) => {
          event!(Level::INFO, %step_name, "Step compensated.");
          compensated.push((*step_name).to_string());
        }
        Err(e) => {
          event!(Level::ERROR, %step_name, error = %e, "CRITICAL: compensation failed, state left behind.");
          compensation_failures.push(CompensationFailure {
            step_name: (*step_name).to_string(),
            error: e,
          });
        }
      }
    }

    SagaFailure {
      failed_step: failed_step.to_string(),
      error,
      compensated,
      compensation_failures,
    }
  }
}
