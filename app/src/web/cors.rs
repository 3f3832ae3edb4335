// productvault/src/web/cors.rs

use actix_cors::Cors;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Browser access policy for the API. A `*` entry allows every origin.
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
  let base = Cors::default()
    .allow_any_method()
    .allow_any_header()
    .max_age(PREFLIGHT_MAX_AGE_SECS);

  if allowed_origins.iter().any(|origin| origin == "*") {
    return base.allow_any_origin().send_wildcard();
  }

  allowed_origins
    .iter()
    .fold(base, |cors, origin| cors.allowed_origin(origin))
}
