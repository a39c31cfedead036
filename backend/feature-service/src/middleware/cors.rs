use crate::config::CorsConfig;
use actix_cors::Cors;

/// Build the CORS middleware for one worker
///
/// A `*` origin allows any origin; the request's origin is echoed back rather
/// than a literal `*` so credentials stay usable.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors = cors
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allow_any_header()
        .max_age(config.max_age_secs);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
