// productvault/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::pipelines::UploadDeps;
use crate::services::{BlobStore, ListingCache, ProductService, ProductStore, SqlProductStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub product_service: Arc<ProductService>,
}

impl AppState {
  /// Connects the metadata store named by the config and wires the services.
  pub async fn initialize(config: AppConfig) -> Result<Self> {
    let store = SqlProductStore::connect(&config.database_url).await?;
    tracing::info!("Metadata store ready.");
    Self::with_store(config, Arc::new(store)).await
  }

  /// Wires the services around an already-open store.
  pub async fn with_store(config: AppConfig, store: Arc<dyn ProductStore>) -> Result<Self> {
    let blobs = BlobStore::new(config.upload_root()?);
    blobs.ensure_root().await?;
    tracing::info!(upload_root = %blobs.root().display(), "Upload root ready.");

    let cache = ListingCache::new(config.listing_cache_max_entries, config.listing_cache_ttl);
    let deps = UploadDeps {
      store,
      blobs,
      base_url: Arc::from(config.app_base_url.as_str()),
    };

    Ok(Self {
      config: Arc::new(config),
      product_service: Arc::new(ProductService::new(deps, cache)),
    })
  }
}
