#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use feature_service::db::{FeatureRepository, InMemoryFeatureRepository};
use feature_service::{AppContext, Config};
use std::sync::Arc;

pub const DEFAULT_PATH: &str = "/product/feature/subfeature";
pub const VERSIONED_PATH: &str = "/api/v1/product/feature/subfeature";

/// `Authorization` header value for the given credentials
pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

pub fn admin() -> String {
    basic("admin", "password")
}

/// App context over a fresh in-memory store; the store handle is returned
/// so tests can inspect it or take it offline.
pub fn memory_context(config: Config) -> (AppContext, Arc<InMemoryFeatureRepository>) {
    let store = Arc::new(InMemoryFeatureRepository::new());
    let repository: Arc<dyn FeatureRepository> = store.clone();
    (AppContext::new(config, repository), store)
}

pub fn default_context() -> (AppContext, Arc<InMemoryFeatureRepository>) {
    memory_context(Config::default())
}
