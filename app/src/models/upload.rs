// productvault/src/models/upload.rs

use actix_web::web::Bytes;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// Stand-in for an uploaded part that carried no filename.
pub const MISSING_FILE_NAME: &str = "unnamed";

/// One file taken from the multipart request, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
  pub original_name: Option<String>,
  pub content_type: Option<String>,
  pub bytes: Bytes,
}

impl UploadedFile {
  pub fn new(original_name: Option<String>, content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
    Self {
      original_name,
      content_type,
      bytes: bytes.into(),
    }
  }

  /// Name reported for this file in the `failed` list.
  pub fn display_name(&self) -> &str {
    self.original_name.as_deref().unwrap_or(MISSING_FILE_NAME)
  }
}

/// Outcome of a bulk upload. Every input file lands in exactly one of the lists,
/// in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
  pub successful: Vec<Product>,
  pub failed: Vec<String>,
}
