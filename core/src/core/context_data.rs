// vault-saga/src/core/context_data.rs
use crate::error::{SagaError, SagaResult};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable state handed to every action and compensation of a saga run.
///
/// Cloning is cheap and yields another handle to the same data.
/// Guards are blocking locks and must not be held across `.await`.
#[derive(Debug)]
pub struct SagaContext<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> SagaContext<T> {
  pub fn new(data: T) -> Self {
    SagaContext(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Unwraps the data once every other handle has been dropped.
  pub fn into_inner(self) -> SagaResult<T> {
    Arc::try_unwrap(self.0).map(RwLock::into_inner).map_err(|shared| SagaError::ContextShared {
      handles: Arc::strong_count(&shared),
    })
  }
}

impl<T: Send + Sync + 'static + Clone> SagaContext<T> {
  /// Clones the current data out from under a read lock.
  pub fn snapshot(&self) -> T {
    self.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for SagaContext<T> {
  fn clone(&self) -> Self {
    SagaContext(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for SagaContext<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
