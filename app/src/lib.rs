// productvault/src/lib.rs

//! Bulk image upload into a product catalog, with a paginated, cached listing.
//!
//! Every uploaded image becomes one product: a row in the metadata store and a
//! folder `PV-<id>` under the upload root holding the image and a
//! `product.json` copy of the row. A file that fails part way is rolled back
//! without affecting the rest of its batch.

pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod web;
