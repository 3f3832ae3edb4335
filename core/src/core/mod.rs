pub mod context_data;
pub mod outcome;
pub mod step;

pub use context_data::SagaContext;
pub use outcome::{CompensationFailure, SagaFailure, SagaReport};
pub use step::{Action, Compensation, StepDef};
