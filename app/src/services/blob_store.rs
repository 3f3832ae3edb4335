// productvault/src/services/blob_store.rs

use std::io::{Error as IoError, ErrorKind};
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument};

use crate::errors::Result;
use crate::models::Product;

pub const FOLDER_PREFIX: &str = "PV-";
pub const METADATA_FILE_NAME: &str = "product.json";

/// A per-product folder directly under the upload root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFolder {
  /// `PV-<id>`, used in the public image URL.
  pub name: String,
  /// Absolute location on disk; stored as the product's `folderPath`.
  pub path: PathBuf,
}

impl ProductFolder {
  pub fn path_string(&self) -> String {
    self.path.to_string_lossy().into_owned()
  }
}

/// Filesystem side of the vault: image bytes and the `product.json` sidecar.
#[derive(Debug, Clone)]
pub struct BlobStore {
  root: PathBuf,
}

impl BlobStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn folder_name(product_id: i64) -> String {
    format!("{}{}", FOLDER_PREFIX, product_id)
  }

  pub fn folder_for(&self, product_id: i64) -> ProductFolder {
    let name = Self::folder_name(product_id);
    let path = self.root.join(&name);
    ProductFolder { name, path }
  }

  pub async fn ensure_root(&self) -> Result<()> {
    fs::create_dir_all(&self.root).await?;
    Ok(())
  }

  #[instrument(name = "blobs::create_product_folder", skip(self))]
  pub async fn create_product_folder(&self, product_id: i64) -> Result<ProductFolder> {
    let folder = self.folder_for(product_id);
    fs::create_dir_all(&folder.path).await?;
    debug!(folder = %folder.path.display(), "Product folder created.");
    Ok(folder)
  }

  /// Writes the image under `file_name`, which must be a single plain path component.
  #[instrument(name = "blobs::write_image", skip(self, folder, bytes), fields(folder = %folder.name, size = bytes.len()))]
  pub async fn write_image(&self, folder: &ProductFolder, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    ensure_plain_file_name(file_name)?;
    let path = folder.path.join(file_name);
    fs::write(&path, bytes).await?;
    Ok(path)
  }

  pub async fn write_sidecar(&self, folder: &ProductFolder, product: &Product) -> Result<PathBuf> {
    let path = folder.path.join(METADATA_FILE_NAME);
    let json = serde_json::to_vec_pretty(product)?;
    fs::write(&path, json).await?;
    Ok(path)
  }

  pub async fn read_sidecar(&self, folder: &ProductFolder) -> Result<Product> {
    let raw = fs::read(folder.path.join(METADATA_FILE_NAME)).await?;
    Ok(serde_json::from_slice(&raw)?)
  }

  /// Removes the folder and everything in it. A folder that is already gone is fine.
  #[instrument(name = "blobs::remove_folder", skip(self, folder), fields(folder = %folder.name))]
  pub async fn remove_folder(&self, folder: &ProductFolder) -> Result<()> {
    match fs::remove_dir_all(&folder.path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}

/// The image must stay a sibling of the sidecar, never the sidecar itself.
fn ensure_plain_file_name(file_name: &str) -> Result<()> {
  let mut components = Path::new(file_name).components();
  match (components.next(), components.next()) {
    (Some(Component::Normal(_)), None) if file_name != METADATA_FILE_NAME => Ok(()),
    _ => Err(
      IoError::new(
        ErrorKind::InvalidInput,
        format!("'{}' is not a plain file name", file_name),
      )
      .into(),
    ),
  }
}
