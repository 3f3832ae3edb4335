// vault-saga/src/core/step.rs

//! Step definitions and the boxed closure types registered against them.

use super::SagaContext;
use std::future::Future;
use std::pin::Pin;

/// A boxed async function over the saga context.
type StepFn<TData, Err> =
  Box<dyn Fn(SagaContext<TData>) -> Pin<Box<dyn Future<Output = Result<(), Err>> + Send>> + Send + Sync>;

/// Forward action of a step.
pub type Action<TData, Err> = StepFn<TData, Err>;

/// Undo action of a step. Only invoked if the step's action completed.
pub type Compensation<TData, Err> = StepFn<TData, Err>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub compensated: bool,
}
