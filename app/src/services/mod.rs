// productvault/src/services/mod.rs

pub mod blob_store;
pub mod listing_cache;
pub mod product_service;
pub mod product_store;

pub use blob_store::{BlobStore, ProductFolder};
pub use listing_cache::ListingCache;
pub use product_service::ProductService;
pub use product_store::{ProductStore, SqlProductStore};
