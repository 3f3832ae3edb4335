// productvault/src/services/listing_cache.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::{PageQuery, ProductResponse};

/// Listing responses keyed by the normalized page/sort query.
///
/// Every upload batch drops all entries. The generation counter keeps a listing
/// that was loaded before an invalidation from being cached after it.
#[derive(Clone)]
pub struct ListingCache {
  entries: Cache<PageQuery, Arc<ProductResponse>>,
  generation: Arc<AtomicU64>,
}

impl ListingCache {
  pub fn new(max_entries: u64, ttl: Duration) -> Self {
    Self {
      entries: Cache::builder().max_capacity(max_entries).time_to_live(ttl).build(),
      generation: Arc::new(AtomicU64::new(0)),
    }
  }

  pub async fn get(&self, query: &PageQuery) -> Option<Arc<ProductResponse>> {
    self.entries.get(query).await
  }

  pub fn generation(&self) -> u64 {
    self.generation.load(Ordering::Acquire)
  }

  /// Caches `response` unless the cache was invalidated since `generation` was read.
  pub async fn insert_if_current(&self, query: PageQuery, response: Arc<ProductResponse>, generation: u64) {
    if self.generation() != generation {
      debug!(?query, "Listing went stale while loading; not caching.");
      return;
    }
    self.entries.insert(query, response).await;
  }

  pub fn invalidate_all(&self) {
    self.generation.fetch_add(1, Ordering::AcqRel);
    self.entries.invalidate_all();
    debug!("Listing cache invalidated.");
  }
}
