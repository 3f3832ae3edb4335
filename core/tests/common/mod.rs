// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use tracing::Level;
use vault_saga::{Action, Compensation, SagaContext, SagaError};

// --- Common Context Struct ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  /// Every action and compensation appends an entry, e.g. "do:insert" / "undo:insert".
  pub journal: Vec<String>,
  /// Resources a step "created"; compensations remove them again.
  pub resources: Vec<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Saga engine error: {0}")]
  Saga(String),

  #[error("Test action failed: {0}")]
  Action(String),

  #[error("Test compensation failed: {0}")]
  Compensation(String),
}

impl From<SagaError> for TestError {
  fn from(se: SagaError) -> Self {
    TestError::Saga(format!("{:?}", se))
  }
}

// --- Common Action / Compensation Creators ---
pub fn creating_action(step_name: &'static str) -> Action<TestContext, TestError> {
  Box::new(move |ctx: SagaContext<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.journal.push(format!("do:{}", step_name));
      guard.resources.push(step_name.to_string());
      tracing::debug!(target: "test_actions", step = %step_name, "created resource");
      Ok(())
    })
  })
}

pub fn failing_action(step_name: &'static str, error_message: &'static str) -> Action<TestContext, TestError> {
  Box::new(move |ctx: SagaContext<TestContext>| {
    Box::pin(async move {
      ctx.write().journal.push(format!("do:{}", step_name));
      tracing::warn!(target: "test_actions", step = %step_name, "failing with: '{}'", error_message);
      Err(TestError::Action(error_message.to_string()))
    })
  })
}

pub fn removing_compensation(step_name: &'static str) -> Compensation<TestContext, TestError> {
  Box::new(move |ctx: SagaContext<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.journal.push(format!("undo:{}", step_name));
      guard.resources.retain(|r| r != step_name);
      Ok(())
    })
  })
}

pub fn failing_compensation(step_name: &'static str, error_message: &'static str) -> Compensation<TestContext, TestError> {
  Box::new(move |ctx: SagaContext<TestContext>| {
    Box::pin(async move {
      ctx.write().journal.push(format!("undo:{}", step_name));
      Err(TestError::Compensation(error_message.to_string()))
    })
  })
}

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
