/// Database access layer
///
/// - `feature_repo`: the `FeatureRepository` contract and its PostgreSQL implementation
/// - `memory`: process-local implementation for development and tests
pub mod feature_repo;
pub mod memory;

pub use feature_repo::{FeatureRepository, PgFeatureRepository, RepositoryError, RepositoryResult};
pub use memory::InMemoryFeatureRepository;

use sqlx::migrate::Migrator;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
