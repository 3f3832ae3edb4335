// productvault/src/web/mod.rs

pub mod cors;
pub mod handlers;
pub mod routes;

pub use cors::cors_policy;
pub use routes::configure_app_routes;
