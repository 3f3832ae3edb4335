// productvault/src/models/product.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::timestamp;

/// Description given to every product created through the bulk upload.
pub const UPLOAD_DESCRIPTION: &str = "Uploaded via Bulk API";

/// A row of the `products` table. Also the shape written to `product.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64,
  pub name: Option<String>, // Original uploaded filename
  pub description: Option<String>,
  pub image_url: Option<String>,
  pub folder_path: Option<String>,
  #[serde(with = "timestamp::serde_format")]
  pub created_at: NaiveDateTime,
}

impl Product {
  /// A product is complete once its image is on disk and the row points at it.
  /// Rows without these are leftovers of a failed upload.
  pub fn is_complete(&self) -> bool {
    self.image_url.is_some() && self.folder_path.is_some()
  }
}

/// Values for the provisional insert, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewProduct {
  pub name: Option<String>,
  pub description: String,
  pub created_at: NaiveDateTime,
}

impl NewProduct {
  pub fn from_upload(original_name: Option<String>) -> Self {
    Self {
      name: original_name,
      description: UPLOAD_DESCRIPTION.to_string(),
      created_at: timestamp::now(),
    }
  }
}
