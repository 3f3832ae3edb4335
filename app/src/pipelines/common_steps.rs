// productvault/src/pipelines/common_steps.rs

//! Pure helpers used by the upload steps.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, Result};
use crate::models::upload::MISSING_FILE_NAME;

// Same character set as Java's `\s`.
static WHITESPACE_RUN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("whitespace pattern must compile"));

const IMAGE_TYPE_PREFIX: &str = "image/";

pub fn validate_image_content_type(content_type: Option<&str>) -> Result<()> {
  match content_type {
    Some(ct) if ct.starts_with(IMAGE_TYPE_PREFIX) => Ok(()),
    other => Err(AppError::Validation(format!(
      "Invalid file type: {}. Only images allowed.",
      other.unwrap_or("none")
    ))),
  }
}

/// Replaces each run of whitespace with a single underscore.
pub fn sanitize_file_name(original_name: Option<&str>) -> String {
  match original_name {
    Some(name) => WHITESPACE_RUN.replace_all(name, "_").into_owned(),
    None => MISSING_FILE_NAME.to_string(),
  }
}

pub fn image_url(base_url: &str, folder_name: &str, file_name: &str) -> String {
  format!("{}/uploads/{}/{}", base_url.trim_end_matches('/'), folder_name, file_name)
}
