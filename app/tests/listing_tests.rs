// tests/listing_tests.rs
mod common;

use common::*;
use productvault::errors::AppError;
use productvault::models::{NewProduct, ProductRequest, ProductResponse};
use productvault::services::ProductStore;

fn request(page_no: u32, page_size: u32, sort_by: &str, sort_type: &str) -> ProductRequest {
  ProductRequest {
    page_no,
    page_size,
    sort_by: sort_by.to_string(),
    sort_type: sort_type.to_string(),
  }
}

fn ids(response: &ProductResponse) -> Vec<i64> {
  response.content.iter().map(|p| p.id).collect()
}

async fn app_with(names: &[&str]) -> TestApp {
  let app = spawn_app().await;
  let files = names.iter().map(|n| png(n)).collect();
  let response = app.state.product_service.upload_products(files).await.unwrap();
  assert_eq!(response.successful.len(), names.len());
  app
}

#[tokio::test]
async fn test_pages_cover_store_without_overlap() {
  let app = app_with(&["a.png", "b.png", "c.png", "d.png", "e.png"]).await;
  let service = &app.state.product_service;

  let first = service.list_products(&request(0, 2, "id", "ASC")).await.unwrap();
  assert_eq!(ids(&first), vec![1, 2]);
  assert_eq!(first.total_elements, 5);
  assert_eq!(first.total_pages, 3);
  assert_eq!(first.page_no, 0);
  assert_eq!(first.page_size, 2);
  assert!(!first.last);

  let second = service.list_products(&request(1, 2, "id", "ASC")).await.unwrap();
  assert_eq!(ids(&second), vec![3, 4]);
  assert!(!second.last);

  let third = service.list_products(&request(2, 2, "id", "ASC")).await.unwrap();
  assert_eq!(ids(&third), vec![5]);
  assert!(third.last);

  let beyond = service.list_products(&request(3, 2, "id", "ASC")).await.unwrap();
  assert!(beyond.content.is_empty());
  assert_eq!(beyond.total_elements, 5);
  assert!(beyond.last);
}

#[tokio::test]
async fn test_default_request_is_newest_first() {
  let app = app_with(&["a.png", "b.png", "c.png"]).await;

  let response = app
    .state
    .product_service
    .list_products(&ProductRequest::default())
    .await
    .unwrap();

  assert_eq!(ids(&response), vec![3, 2, 1]);
  assert_eq!(response.page_size, 10);
  assert!(response.last);
}

#[tokio::test]
async fn test_sort_type_other_than_asc_sorts_descending() {
  let app = app_with(&["a.png", "b.png"]).await;
  let service = &app.state.product_service;

  let lower = service.list_products(&request(0, 10, "id", "asc")).await.unwrap();
  assert_eq!(ids(&lower), vec![1, 2]);

  let bogus = service.list_products(&request(0, 10, "id", "sideways")).await.unwrap();
  assert_eq!(ids(&bogus), vec![2, 1]);
}

#[tokio::test]
async fn test_sort_by_name_breaks_ties_by_id() {
  let app = app_with(&["b.png", "a.png", "b.png"]).await;
  let service = &app.state.product_service;

  let asc = service.list_products(&request(0, 10, "name", "ASC")).await.unwrap();
  assert_eq!(ids(&asc), vec![2, 1, 3]);

  let desc = service.list_products(&request(0, 10, "name", "DESC")).await.unwrap();
  assert_eq!(ids(&desc), vec![3, 1, 2]);
}

#[tokio::test]
async fn test_unknown_sort_field_is_rejected() {
  let app = app_with(&["a.png"]).await;

  let result = app
    .state
    .product_service
    .list_products(&request(0, 10, "price", "ASC"))
    .await;

  assert!(matches!(result, Err(AppError::InvalidSortField(field)) if field == "price"));
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
  let app = spawn_app().await;

  let result = app.state.product_service.list_products(&request(0, 0, "id", "ASC")).await;

  assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_listing_is_served_from_cache_until_next_upload() {
  let app = app_with(&["a.png"]).await;
  let service = &app.state.product_service;
  let query = ProductRequest::default();

  assert_eq!(service.list_products(&query).await.unwrap().total_elements, 1);

  // A row written behind the service's back is not visible while cached.
  app
    .store
    .insert(&NewProduct::from_upload(Some("direct.png".to_string())))
    .await
    .unwrap();
  assert_eq!(service.list_products(&query).await.unwrap().total_elements, 1);

  service.upload_products(vec![png("b.png")]).await.unwrap();
  assert_eq!(service.list_products(&query).await.unwrap().total_elements, 3);
}

#[tokio::test]
async fn test_cache_is_invalidated_even_if_every_file_fails() {
  let app = app_with(&["a.png"]).await;
  let service = &app.state.product_service;
  let query = ProductRequest::default();

  assert_eq!(service.list_products(&query).await.unwrap().total_elements, 1);
  app
    .store
    .insert(&NewProduct::from_upload(Some("direct.png".to_string())))
    .await
    .unwrap();

  let response = service.upload_products(vec![text("notes.txt")]).await.unwrap();
  assert_eq!(response.failed.len(), 1);

  assert_eq!(service.list_products(&query).await.unwrap().total_elements, 2);
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
  let app = spawn_app().await;

  let response = app
    .state
    .product_service
    .list_products(&ProductRequest::default())
    .await
    .unwrap();

  assert!(response.content.is_empty());
  assert_eq!(response.total_elements, 0);
  assert_eq!(response.total_pages, 0);
  assert!(response.last);
}
