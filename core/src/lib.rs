// src/lib.rs

//! vault-saga: a small asynchronous step engine with compensating actions.
//!
//! A `Saga` is an ordered list of named steps. Every step has one forward
//! action and may have a compensation that undoes it. Running the saga
//! executes the actions in order against a shared `SagaContext<T>`. When an
//! action fails, the compensations of all steps that already completed run in
//! reverse order. Compensation failures are logged and reported, never raised,
//! so a caller always gets back the error that actually stopped the saga.
//!
//! Typical use:
//!  1. Define a context struct `MyCtx` carrying the state the steps share.
//!  2. Declare the steps with `Saga::<MyCtx, MyError>::new(&[...])`.
//!  3. Register actions with `.on_step()` and undo actions with `.compensate_with()`.
//!  4. Wrap a `MyCtx` in a `SagaContext` and call `saga.run(ctx.clone()).await`.
//!
//! Actions and compensations receive a clone of the `SagaContext` handle.
//! Lock guards obtained from it must be dropped before any `.await`.

pub mod core;
pub mod error;
pub mod saga;

pub use crate::core::context_data::SagaContext;
pub use crate::core::outcome::{CompensationFailure, SagaFailure, SagaReport};
pub use crate::core::step::{Action, Compensation, StepDef};
pub use crate::error::{SagaError, SagaResult};
pub use crate::saga::Saga;
