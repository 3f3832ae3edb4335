// productvault/src/services/product_store.rs

//! The metadata store: one `products` row per uploaded image.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};
use crate::models::{NewProduct, Page, PageQuery, Product};

const PRODUCT_COLUMNS: &str = "id, name, description, image_url, folder_path, created_at";

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Inserts a provisional record; the store assigns the id.
  async fn insert(&self, new_product: &NewProduct) -> Result<Product>;

  /// Sets `image_url` and `folder_path` on an existing record.
  async fn update_location(&self, id: i64, image_url: &str, folder_path: &str) -> Result<Product>;

  /// Deleting an id that does not exist is not an error.
  async fn delete(&self, id: i64) -> Result<()>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

  /// Fails with `AppError::InvalidSortField` if `sort_by` is not a product attribute.
  async fn find_page(&self, query: &PageQuery) -> Result<Page<Product>>;
}

/// Maps a product attribute name, as it appears in JSON, to its column.
fn sort_column(field: &str) -> Result<&'static str> {
  match field {
    "id" => Ok("id"),
    "name" => Ok("name"),
    "description" => Ok("description"),
    "imageUrl" => Ok("image_url"),
    "folderPath" => Ok("folder_path"),
    "createdAt" => Ok("created_at"),
    other => Err(AppError::InvalidSortField(other.to_string())),
  }
}

#[derive(Debug, Clone)]
pub struct SqlProductStore {
  pool: SqlitePool,
}

impl SqlProductStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Opens a pool for `database_url` and brings the schema up to date.
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = SqlitePoolOptions::new().max_connections(5).connect(database_url).await?;
    let store = Self::new(pool);
    store.migrate().await?;
    Ok(store)
  }

  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations").run(&self.pool).await?;
    Ok(())
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}

#[async_trait]
impl ProductStore for SqlProductStore {
  #[instrument(name = "store::insert", skip_all, fields(name = ?new_product.name))]
  async fn insert(&self, new_product: &NewProduct) -> Result<Product> {
    let sql = format!(
      "INSERT INTO products (name, description, created_at) VALUES (?, ?, ?) RETURNING {}",
      PRODUCT_COLUMNS
    );
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(new_product.name.as_deref())
      .bind(&new_product.description)
      .bind(new_product.created_at)
      .fetch_one(&self.pool)
      .await?;
    debug!(product_id = product.id, "Product row inserted.");
    Ok(product)
  }

  #[instrument(name = "store::update_location", skip(self))]
  async fn update_location(&self, id: i64, image_url: &str, folder_path: &str) -> Result<Product> {
    let sql = format!(
      "UPDATE products SET image_url = ?, folder_path = ? WHERE id = ? RETURNING {}",
      PRODUCT_COLUMNS
    );
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(image_url)
      .bind(folder_path)
      .bind(id)
      .fetch_one(&self.pool)
      .await?;
    Ok(product)
  }

  #[instrument(name = "store::delete", skip(self))]
  async fn delete(&self, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      debug!(product_id = id, "No product row to delete.");
    }
    Ok(())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  #[instrument(name = "store::find_page", skip(self))]
  async fn find_page(&self, query: &PageQuery) -> Result<Page<Product>> {
    let column = sort_column(&query.sort_by)?;
    let direction = query.direction.as_sql();
    // Ties are broken by id so that pages never overlap.
    let order_by = if column == "id" {
      format!("id {}", direction)
    } else {
      format!("{} {}, id {}", column, direction, direction)
    };

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await?;

    let sql = format!(
      "SELECT {} FROM products ORDER BY {} LIMIT ? OFFSET ?",
      PRODUCT_COLUMNS, order_by
    );
    let content = sqlx::query_as::<_, Product>(&sql)
      .bind(i64::from(query.page_size))
      .bind(query.offset())
      .fetch_all(&self.pool)
      .await?;

    Ok(Page {
      content,
      number: query.page_no,
      size: query.page_size,
      total_elements: total.max(0) as u64,
    })
  }
}
