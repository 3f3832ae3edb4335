// productvault/src/pipelines/upload_pipeline.rs

//! The saga that turns one uploaded file into a product.
//!
//! A provisional row is inserted first so the store hands out the id the
//! folder is named after. Once the row and the folder exist, any later failure
//! deletes the folder and then the row.

use tracing::{info, instrument};
use vault_saga::{Saga, SagaContext};

use crate::errors::{AppError, Result};
use crate::models::NewProduct;
use crate::pipelines::common_steps::{image_url, sanitize_file_name, validate_image_content_type};
use crate::pipelines::contexts::UploadCtxData;

pub const VALIDATE_CONTENT_TYPE: &str = "validate_content_type";
pub const CREATE_PROVISIONAL_RECORD: &str = "create_provisional_record";
pub const CREATE_PRODUCT_FOLDER: &str = "create_product_folder";
pub const WRITE_IMAGE: &str = "write_image";
pub const PERSIST_IMAGE_LOCATION: &str = "persist_image_location";
pub const WRITE_METADATA_SIDECAR: &str = "write_metadata_sidecar";

pub type UploadSaga = Saga<UploadCtxData, AppError>;

pub fn build_upload_saga() -> UploadSaga {
  let mut saga = Saga::new(&[
    VALIDATE_CONTENT_TYPE,
    CREATE_PROVISIONAL_RECORD,
    CREATE_PRODUCT_FOLDER,
    WRITE_IMAGE,
    PERSIST_IMAGE_LOCATION,
    WRITE_METADATA_SIDECAR,
  ]);

  saga.on_step(VALIDATE_CONTENT_TYPE, validate_content_type_step);
  saga.on_step(CREATE_PROVISIONAL_RECORD, create_provisional_record_step);
  saga.compensate_with(CREATE_PROVISIONAL_RECORD, delete_provisional_record);
  saga.on_step(CREATE_PRODUCT_FOLDER, create_product_folder_step);
  saga.compensate_with(CREATE_PRODUCT_FOLDER, remove_product_folder);
  saga.on_step(WRITE_IMAGE, write_image_step);
  saga.on_step(PERSIST_IMAGE_LOCATION, persist_image_location_step);
  saga.on_step(WRITE_METADATA_SIDECAR, write_metadata_sidecar_step);

  saga
}

fn product_id(ctx: &SagaContext<UploadCtxData>) -> Result<i64> {
  ctx
    .read()
    .product
    .as_ref()
    .map(|p| p.id)
    .ok_or_else(|| AppError::Internal("product record missing from upload context".to_string()))
}

async fn validate_content_type_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let content_type = ctx.read().file.content_type.clone();
  validate_image_content_type(content_type.as_deref())
}

#[instrument(name = "upload_step::create_provisional_record", skip(ctx), err)]
async fn create_provisional_record_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let (store, new_product) = {
    let guard = ctx.read();
    (guard.deps.store.clone(), NewProduct::from_upload(guard.file.original_name.clone()))
  };

  let product = store.insert(&new_product).await?;
  info!(product_id = product.id, "Provisional product record created.");
  ctx.write().product = Some(product);
  Ok(())
}

async fn delete_provisional_record(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let (store, id) = {
    let guard = ctx.read();
    (guard.deps.store.clone(), guard.product.as_ref().map(|p| p.id))
  };
  let Some(id) = id else {
    return Ok(());
  };

  store.delete(id).await?;
  info!(product_id = id, "Provisional product record deleted.");
  Ok(())
}

#[instrument(name = "upload_step::create_product_folder", skip(ctx), err)]
async fn create_product_folder_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let id = product_id(&ctx)?;
  let blobs = ctx.read().deps.blobs.clone();

  let folder = blobs.create_product_folder(id).await?;
  ctx.write().folder = Some(folder);
  Ok(())
}

async fn remove_product_folder(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let (blobs, folder) = {
    let guard = ctx.read();
    (guard.deps.blobs.clone(), guard.folder.clone())
  };
  let Some(folder) = folder else {
    return Ok(());
  };

  blobs.remove_folder(&folder).await?;
  info!(folder = %folder.path.display(), "Product folder removed.");
  Ok(())
}

#[instrument(name = "upload_step::write_image", skip(ctx), err)]
async fn write_image_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let (blobs, folder, file_name, bytes) = {
    let guard = ctx.read();
    let folder = guard
      .folder
      .clone()
      .ok_or_else(|| AppError::Internal("product folder missing from upload context".to_string()))?;
    (
      guard.deps.blobs.clone(),
      folder,
      sanitize_file_name(guard.file.original_name.as_deref()),
      guard.file.bytes.clone(),
    )
  };

  blobs.write_image(&folder, &file_name, &bytes).await?;
  ctx.write().stored_file_name = Some(file_name);
  Ok(())
}

#[instrument(name = "upload_step::persist_image_location", skip(ctx), err)]
async fn persist_image_location_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let id = product_id(&ctx)?;
  let (store, url, folder_path) = {
    let guard = ctx.read();
    let (Some(folder), Some(file_name)) = (guard.folder.as_ref(), guard.stored_file_name.as_deref()) else {
      return Err(AppError::Internal("image location missing from upload context".to_string()));
    };
    (
      guard.deps.store.clone(),
      image_url(&guard.deps.base_url, &folder.name, file_name),
      folder.path_string(),
    )
  };

  let product = store.update_location(id, &url, &folder_path).await?;
  ctx.write().product = Some(product);
  Ok(())
}

async fn write_metadata_sidecar_step(ctx: SagaContext<UploadCtxData>) -> Result<()> {
  let (blobs, folder, product) = {
    let guard = ctx.read();
    match (guard.folder.clone(), guard.product.clone()) {
      (Some(folder), Some(product)) => (guard.deps.blobs.clone(), folder, product),
      _ => return Err(AppError::Internal("product missing from upload context".to_string())),
    }
  };

  blobs.write_sidecar(&folder, &product).await?;
  Ok(())
}
