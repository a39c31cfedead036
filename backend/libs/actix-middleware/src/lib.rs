//! # Actix Middleware Library
//!
//! Shared middleware components for template-generated Actix services
//!
//! ## Modules
//! - `basic_auth`: HTTP Basic authentication against a single in-memory user
//! - `public_paths`: path allow-list that bypasses authentication

pub mod basic_auth;
pub mod public_paths;

pub use basic_auth::{AuthError, AuthenticatedUser, BasicAuthConfig, BasicAuthMiddleware, InMemoryUser};
pub use public_paths::PublicPaths;
