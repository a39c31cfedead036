/// HTTP handlers
///
/// - `feature`: the scaffolded product/feature endpoint
/// - `health`: root, actuator health and info endpoints
pub mod feature;
pub mod health;

pub use feature::handle_feature;
pub use health::{health, info, liveness, root, HealthState};
