// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tracing::Level;

use productvault::config::AppConfig;
use productvault::errors::{AppError, Result};
use productvault::models::{NewProduct, Page, PageQuery, Product, UploadedFile};
use productvault::services::{ProductStore, SqlProductStore};
use productvault::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";
pub const MAX_UPLOAD_BYTES: usize = 1024;

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

pub fn test_config(upload_dir: &Path) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 8080,
    database_url: "sqlite::memory:".to_string(),
    app_base_url: BASE_URL.to_string(),
    upload_dir: upload_dir.to_path_buf(),
    max_upload_bytes: MAX_UPLOAD_BYTES,
    listing_cache_max_entries: 100,
    listing_cache_ttl: Duration::from_secs(60),
    cors_allowed_origins: vec!["*".to_string()],
  }
}

/// An in-memory database lives as long as its single connection does.
pub async fn memory_store() -> SqlProductStore {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect("sqlite::memory:")
    .await
    .expect("in-memory sqlite should open");
  let store = SqlProductStore::new(pool);
  store.migrate().await.expect("migrations should apply");
  store
}

pub struct TestApp {
  pub state: AppState,
  pub store: Arc<SqlProductStore>,
  pub upload_root: PathBuf,
  _dir: TempDir,
}

impl TestApp {
  pub async fn row_count(&self) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(self.store.pool())
      .await
      .expect("count query should run")
  }

  /// Folder names under the upload root, sorted.
  pub fn folders(&self) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(&self.upload_root)
      .expect("upload root should exist")
      .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }
}

pub async fn spawn_app() -> TestApp {
  spawn_app_with(|store, _| store as Arc<dyn ProductStore>).await
}

/// Builds the app around `wrap(store, upload_root)`, so tests can inject a failing store.
pub async fn spawn_app_with<F>(wrap: F) -> TestApp
where
  F: FnOnce(Arc<SqlProductStore>, &Path) -> Arc<dyn ProductStore>,
{
  setup_tracing();
  let dir = tempfile::tempdir().expect("tempdir");
  let upload_root = dir.path().join("uploads");
  let store = Arc::new(memory_store().await);

  let state = AppState::with_store(test_config(&upload_root), wrap(Arc::clone(&store), &upload_root))
    .await
    .expect("state should build");

  TestApp {
    state,
    store,
    upload_root,
    _dir: dir,
  }
}

pub fn png(name: &str) -> UploadedFile {
  UploadedFile::new(Some(name.to_string()), Some("image/png".to_string()), b"\x89PNG\r\n\x1a\nfake".to_vec())
}

pub fn text(name: &str) -> UploadedFile {
  UploadedFile::new(Some(name.to_string()), Some("text/plain".to_string()), b"hello".to_vec())
}

/// Delegates to the real store but can be told to fail individual operations.
pub struct FaultyStore {
  pub inner: Arc<SqlProductStore>,
  /// Inserts of a product with this name fail.
  pub fail_insert_named: Option<&'static str>,
  pub fail_update: bool,
  pub fail_delete: bool,
  /// When set, a failing update first swaps the product's folder under this
  /// root for a plain file, so removing the folder fails as well.
  pub clobber_folder_under: Option<PathBuf>,
}

impl FaultyStore {
  pub fn new(inner: Arc<SqlProductStore>) -> Self {
    Self {
      inner,
      fail_insert_named: None,
      fail_update: false,
      fail_delete: false,
      clobber_folder_under: None,
    }
  }
}

#[async_trait]
impl ProductStore for FaultyStore {
  async fn insert(&self, new_product: &NewProduct) -> Result<Product> {
    if self.fail_insert_named.is_some() && new_product.name.as_deref() == self.fail_insert_named {
      return Err(AppError::Internal("injected insert failure".to_string()));
    }
    self.inner.insert(new_product).await
  }

  async fn update_location(&self, id: i64, image_url: &str, folder_path: &str) -> Result<Product> {
    if self.fail_update {
      if let Some(root) = &self.clobber_folder_under {
        let folder = root.join(format!("PV-{}", id));
        std::fs::remove_dir_all(&folder).expect("folder should exist before update");
        std::fs::write(&folder, b"not a folder").expect("clobber file should be written");
      }
      return Err(AppError::Internal("injected update failure".to_string()));
    }
    self.inner.update_location(id, image_url, folder_path).await
  }

  async fn delete(&self, id: i64) -> Result<()> {
    if self.fail_delete {
      return Err(AppError::Internal("injected delete failure".to_string()));
    }
    self.inner.delete(id).await
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
    self.inner.find_by_id(id).await
  }

  async fn find_page(&self, query: &PageQuery) -> Result<Page<Product>> {
    self.inner.find_page(query).await
  }
}
