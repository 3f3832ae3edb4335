// productvault/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  /// Base of the public image URLs, without a trailing slash.
  pub app_base_url: String,
  /// Upload root as configured; may be relative to the working directory.
  pub upload_dir: PathBuf,
  /// Per-file upload limit in bytes.
  pub max_upload_bytes: usize,

  pub listing_cache_max_entries: u64,
  pub listing_cache_ttl: Duration,

  /// Origins allowed to call the API from a browser; `*` allows any.
  pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite://productvault.db?mode=rwc".to_string());
    let app_base_url = get_env("APP_BASE_URL")
      .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();
    let upload_dir = PathBuf::from(get_env("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

    let max_upload_bytes = get_env("MAX_UPLOAD_BYTES")
      .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?;

    let listing_cache_max_entries = get_env("LISTING_CACHE_MAX_ENTRIES")
      .unwrap_or_else(|_| "1000".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid LISTING_CACHE_MAX_ENTRIES: {}", e)))?;
    let listing_cache_ttl_secs = get_env("LISTING_CACHE_TTL_SECS")
      .unwrap_or_else(|_| "300".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid LISTING_CACHE_TTL_SECS: {}", e)))?;

    let cors_allowed_origins: Vec<String> = get_env("CORS_ALLOWED_ORIGINS")
      .unwrap_or_else(|_| "*".to_string())
      .split(',')
      .map(|origin| origin.trim().trim_end_matches('/').to_string())
      .filter(|origin| !origin.is_empty())
      .collect();

    tracing::info!(
      upload_dir = %upload_dir.display(),
      base_url = %app_base_url,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      upload_dir,
      max_upload_bytes,
      listing_cache_max_entries,
      listing_cache_ttl: Duration::from_secs(listing_cache_ttl_secs),
      cors_allowed_origins,
    })
  }

  /// The upload root as an absolute path, resolved against the process working directory.
  pub fn upload_root(&self) -> Result<PathBuf> {
    if self.upload_dir.is_absolute() {
      return Ok(self.upload_dir.clone());
    }
    let cwd = env::current_dir().map_err(AppError::Storage)?;
    Ok(cwd.join(&self.upload_dir))
  }
}
