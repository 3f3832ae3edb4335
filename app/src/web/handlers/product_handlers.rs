// productvault/src/web/handlers/product_handlers.rs

use actix_multipart::{Field, Multipart};
use actix_web::web::BytesMut;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use tracing::{info, instrument};

use crate::errors::{ApiError, AppError, Result};
use crate::models::{ProductRequest, UploadedFile};
use crate::state::AppState;

/// Name of the multipart part(s) carrying the images.
pub const UPLOAD_FIELD: &str = "files";

#[instrument(name = "handler::upload_products", skip_all)]
pub async fn upload_products_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  payload: Multipart,
) -> Result<HttpResponse, ApiError> {
  let files = read_upload_parts(payload, app_state.config.max_upload_bytes)
    .await
    .map_err(|e| e.at(&req))?;

  if files.is_empty() {
    return Err(AppError::Validation(format!("Required part '{}' is not present.", UPLOAD_FIELD)).at(&req));
  }

  info!(files = files.len(), "Bulk upload received.");
  let response = app_state
    .product_service
    .upload_products(files)
    .await
    .map_err(|e| e.at(&req))?;

  Ok(HttpResponse::Ok().json(response))
}

#[instrument(name = "handler::list_products", skip(app_state, req))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query: web::Query<ProductRequest>,
) -> Result<HttpResponse, ApiError> {
  let response = app_state
    .product_service
    .list_products(&query)
    .await
    .map_err(|e| e.at(&req))?;

  info!(
    returned = response.content.len(),
    total = response.total_elements,
    "Products listed."
  );
  Ok(HttpResponse::Ok().json(response))
}

/// Buffers every `files` part. Any single part over `limit` bytes rejects the whole request.
async fn read_upload_parts(mut payload: Multipart, limit: usize) -> Result<Vec<UploadedFile>> {
  let mut files = Vec::new();

  while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
    if field.name() != Some(UPLOAD_FIELD) {
      drain(&mut field).await?;
      continue;
    }

    let original_name = field
      .content_disposition()
      .and_then(|cd| cd.get_filename())
      .map(str::to_string);
    let content_type = field.content_type().map(|mime| mime.to_string());

    let mut buf = BytesMut::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
      if buf.len() + chunk.len() > limit {
        return Err(AppError::UploadTooLarge {
          file_name: original_name.unwrap_or_else(|| crate::models::upload::MISSING_FILE_NAME.to_string()),
          limit,
        });
      }
      buf.extend_from_slice(&chunk);
    }

    files.push(UploadedFile::new(original_name, content_type, buf.freeze()));
  }

  Ok(files)
}

async fn drain(field: &mut Field) -> Result<()> {
  while field.try_next().await.map_err(multipart_error)?.is_some() {}
  Ok(())
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
  AppError::Multipart(err.to_string())
}
