/// HTTP middleware for feature-service
///
/// Authentication comes from the shared `actix-middleware` crate; the CORS
/// policy is built here from [`crate::config::CorsConfig`].
pub mod cors;

pub use actix_middleware::BasicAuthMiddleware;
pub use cors::build_cors;
