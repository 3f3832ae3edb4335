// productvault/src/pipelines/contexts.rs

//! Data carried through one file's upload saga.

use std::sync::Arc;

use crate::models::{Product, UploadedFile};
use crate::services::{BlobStore, ProductFolder, ProductStore};

/// What the upload steps need from the application, shared by every run.
#[derive(Clone)]
pub struct UploadDeps {
  pub store: Arc<dyn ProductStore>,
  pub blobs: BlobStore,
  /// Base of public image URLs, without a trailing slash.
  pub base_url: Arc<str>,
}

pub struct UploadCtxData {
  pub deps: UploadDeps,
  pub file: UploadedFile,
  /// Set once the provisional row exists; replaced by the completed row later.
  pub product: Option<Product>,
  pub folder: Option<ProductFolder>,
  pub stored_file_name: Option<String>,
}

impl UploadCtxData {
  pub fn new(deps: UploadDeps, file: UploadedFile) -> Self {
    Self {
      deps,
      file,
      product: None,
      folder: None,
      stored_file_name: None,
    }
  }
}
