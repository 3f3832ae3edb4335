// productvault/src/models/listing.rs

//! Page/sort request, the store's page result, and the listing response built from it.

use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::errors::{AppError, Result};

fn default_page_size() -> u32 {
  10
}

fn default_sort_by() -> String {
  "id".to_string()
}

fn default_sort_type() -> String {
  "DESC".to_string()
}

/// Query parameters of `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
  #[serde(default)]
  pub page_no: u32,
  #[serde(default = "default_page_size")]
  pub page_size: u32,
  #[serde(default = "default_sort_by")]
  pub sort_by: String,
  #[serde(default = "default_sort_type")]
  pub sort_type: String,
}

impl Default for ProductRequest {
  fn default() -> Self {
    Self {
      page_no: 0,
      page_size: default_page_size(),
      sort_by: default_sort_by(),
      sort_type: default_sort_type(),
    }
  }
}

impl ProductRequest {
  /// Normalizes the request into the query the store runs (and the listing cache key).
  pub fn to_query(&self) -> Result<PageQuery> {
    if self.page_size == 0 {
      return Err(AppError::Validation("Page size must not be less than one".to_string()));
    }
    Ok(PageQuery {
      page_no: self.page_no,
      page_size: self.page_size,
      sort_by: self.sort_by.clone(),
      direction: SortDirection::resolve(&self.sort_type),
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
  Asc,
  Desc,
}

impl SortDirection {
  /// Ascending only for a case-insensitive `ASC`; anything else sorts descending.
  pub fn resolve(token: &str) -> Self {
    if token.eq_ignore_ascii_case("ASC") {
      SortDirection::Asc
    } else {
      SortDirection::Desc
    }
  }

  pub fn as_sql(&self) -> &'static str {
    match self {
      SortDirection::Asc => "ASC",
      SortDirection::Desc => "DESC",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageQuery {
  pub page_no: u32,
  pub page_size: u32,
  pub sort_by: String,
  pub direction: SortDirection,
}

impl PageQuery {
  pub fn offset(&self) -> i64 {
    i64::from(self.page_no) * i64::from(self.page_size)
  }
}

/// One page of a sorted query, as returned by the store.
#[derive(Debug, Clone)]
pub struct Page<T> {
  pub content: Vec<T>,
  pub number: u32,
  pub size: u32,
  pub total_elements: u64,
}

impl<T> Page<T> {
  pub fn total_pages(&self) -> u32 {
    if self.size == 0 {
      return 1;
    }
    self.total_elements.div_ceil(u64::from(self.size)) as u32
  }

  pub fn is_last(&self) -> bool {
    u64::from(self.number) + 1 >= u64::from(self.total_pages())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
  pub content: Vec<Product>,
  pub page_no: u32,
  pub page_size: u32,
  pub total_elements: u64,
  pub total_pages: u32,
  pub last: bool,
}

impl From<Page<Product>> for ProductResponse {
  fn from(page: Page<Product>) -> Self {
    let total_pages = page.total_pages();
    let last = page.is_last();
    Self {
      page_no: page.number,
      page_size: page.size,
      total_elements: page.total_elements,
      total_pages,
      last,
      content: page.content,
    }
  }
}
