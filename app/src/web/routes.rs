// productvault/src/web/routes.rs

use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::product_handlers;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed query strings get the same error body as every other failure.
fn query_error_handler(err: actix_web::error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(err.to_string()).at(req).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .app_data(web::QueryConfig::default().error_handler(query_error_handler))
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/upload", web::post().to(product_handlers::upload_products_handler)),
      ),
  );
}
