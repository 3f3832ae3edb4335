// productvault/src/services/product_service.rs

use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use vault_saga::SagaContext;

use crate::errors::Result;
use crate::models::{ProductRequest, ProductResponse, UploadResponse, UploadedFile};
use crate::pipelines::upload_pipeline::{build_upload_saga, UploadSaga};
use crate::pipelines::{UploadCtxData, UploadDeps};
use crate::services::listing_cache::ListingCache;

/// Bulk upload and cached listing over the metadata store and the blob store.
pub struct ProductService {
  deps: UploadDeps,
  cache: ListingCache,
  upload_saga: UploadSaga,
}

impl ProductService {
  pub fn new(deps: UploadDeps, cache: ListingCache) -> Self {
    Self {
      deps,
      cache,
      upload_saga: build_upload_saga(),
    }
  }

  /// Stores each file as its own product, in input order.
  ///
  /// A file that fails is rolled back and reported in `failed`; it never stops
  /// the rest of the batch. Only an unusable upload root fails the call.
  #[instrument(name = "product_service::upload_products", skip_all, fields(files = files.len()))]
  pub async fn upload_products(&self, files: Vec<UploadedFile>) -> Result<UploadResponse> {
    self.deps.blobs.ensure_root().await?;

    let mut response = UploadResponse::default();
    for file in files {
      let display_name = file.display_name().to_string();
      let ctx = SagaContext::new(UploadCtxData::new(self.deps.clone(), file));

      match self.upload_saga.run(ctx.clone()).await {
        Ok(_) => {
          let stored = ctx.read().product.clone();
          match stored {
            Some(product) => {
              info!(product_id = product.id, file = %display_name, "File stored.");
              response.successful.push(product);
            }
            None => {
              error!(file = %display_name, "Upload finished without a product record.");
              response.failed.push(display_name);
            }
          }
        }
        Err(failure) => {
          for leftover in &failure.compensation_failures {
            error!(
              file = %display_name,
              step = %leftover.step_name,
              error = %leftover.error,
              "CRITICAL: rollback incomplete, orphaned state remains."
            );
          }
          warn!(file = %display_name, %failure, "File rejected.");
          response.failed.push(display_name);
        }
      }
    }

    self.cache.invalidate_all();
    info!(
      successful = response.successful.len(),
      failed = response.failed.len(),
      "Bulk upload processed."
    );
    Ok(response)
  }

  #[instrument(name = "product_service::list_products", skip(self))]
  pub async fn list_products(&self, request: &ProductRequest) -> Result<ProductResponse> {
    let query = request.to_query()?;
    if let Some(cached) = self.cache.get(&query).await {
      return Ok(cached.as_ref().clone());
    }

    let generation = self.cache.generation();
    let page = self.deps.store.find_page(&query).await?;
    let response = ProductResponse::from(page);
    self
      .cache
      .insert_if_current(query, Arc::new(response.clone()), generation)
      .await;
    Ok(response)
  }
}
