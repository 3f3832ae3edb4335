// productvault/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use productvault::config::AppConfig;
use productvault::state::AppState;
use productvault::{telemetry, web};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  telemetry::init_tracing(); // RUST_LOG overrides the default level

  tracing::info!("Starting ProductVault server...");

  let app_config = AppConfig::from_env().context("failed to load application configuration")?;
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let allowed_origins = app_config.cors_allowed_origins.clone();

  let app_state = AppState::initialize(app_config)
    .await
    .context("failed to initialize application state")?;

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(web::cors_policy(&allowed_origins))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
