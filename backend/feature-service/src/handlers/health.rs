/// Root, health and info endpoints (all on the public allow-list)
use crate::config::Config;
use crate::db::FeatureRepository;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

pub struct HealthState {
    repository: Arc<dyn FeatureRepository>,
    config: Arc<Config>,
}

impl HealthState {
    pub fn new(repository: Arc<dyn FeatureRepository>, config: Arc<Config>) -> Self {
        Self { repository, config }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "UPPERCASE")]
enum Status {
    Up,
    Down,
}

#[derive(Serialize)]
struct HealthResponse {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    timestamp: String,
}

/// GET /
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": Config::service_name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /actuator/health and /actuator/health/readiness
///
/// Probes the store with a `count()`; any failure reports DOWN with 503.
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let start = Instant::now();
    let result = state.repository.count().await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: Status::Up,
            error: None,
            latency_ms,
            timestamp: Utc::now().to_rfc3339(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Store health probe failed");
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: Status::Down,
                error: Some(e.to_string()),
                latency_ms,
                timestamp: Utc::now().to_rfc3339(),
            })
        }
    }
}

/// GET /actuator/health/liveness
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "UP" }))
}

/// GET /actuator/info
pub async fn info(state: web::Data<HealthState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": Config::service_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.app.env,
    }))
}
