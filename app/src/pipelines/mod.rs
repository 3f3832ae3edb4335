// productvault/src/pipelines/mod.rs

//! The per-file upload saga and the pieces its steps share.

pub mod common_steps;
pub mod contexts;
pub mod upload_pipeline;

pub use contexts::{UploadCtxData, UploadDeps};
pub use upload_pipeline::build_upload_saga;
