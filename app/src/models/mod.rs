// productvault/src/models/mod.rs

//! Records stored in the metadata store and the request/response shapes built from them.

pub mod listing;
pub mod product;
pub mod timestamp;
pub mod upload;

pub use listing::{Page, PageQuery, ProductRequest, ProductResponse, SortDirection};
pub use product::{NewProduct, Product};
pub use upload::{UploadResponse, UploadedFile};
