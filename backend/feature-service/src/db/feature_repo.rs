/// Feature repository - CRUD persistence for `FeatureEntity`
use crate::models::FeatureEntity;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Store-level failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backing store could not be reached (connectivity, pool exhaustion)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backing store rejected the operation
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => RepositoryError::Unavailable(err.to_string()),
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Create/read/update/delete capability over feature entities.
///
/// Consumers hold an `Arc<dyn FeatureRepository>` and never depend on a
/// concrete storage engine.
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Persist an entity, assigning an id when absent, and return the stored row.
    ///
    /// An entity whose id already exists is updated in place.
    async fn save(&self, entity: FeatureEntity) -> RepositoryResult<FeatureEntity>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FeatureEntity>>;

    async fn find_all(&self) -> RepositoryResult<Vec<FeatureEntity>>;

    async fn exists_by_id(&self, id: &str) -> RepositoryResult<bool>;

    async fn count(&self) -> RepositoryResult<u64>;

    /// Remove an entity; removing an absent id is not an error
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;

    async fn delete_all(&self) -> RepositoryResult<()>;
}

/// Id used for entities saved without one
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// PostgreSQL implementation backed by a sqlx pool
#[derive(Clone)]
pub struct PgFeatureRepository {
    pool: PgPool,
}

impl PgFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureRepository for PgFeatureRepository {
    async fn save(&self, entity: FeatureEntity) -> RepositoryResult<FeatureEntity> {
        let id = entity.id.unwrap_or_else(generate_id);

        let stored = sqlx::query_as::<_, FeatureEntity>(
            r#"
            INSERT INTO feature_example_obj (feature_pk, feature_string)
            VALUES ($1, $2)
            ON CONFLICT (feature_pk) DO UPDATE SET feature_string = EXCLUDED.feature_string
            RETURNING feature_pk, feature_string
            "#,
        )
        .bind(&id)
        .bind(entity.feature_string.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FeatureEntity>> {
        let entity = sqlx::query_as::<_, FeatureEntity>(
            r#"
            SELECT feature_pk, feature_string
            FROM feature_example_obj
            WHERE feature_pk = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<FeatureEntity>> {
        let entities = sqlx::query_as::<_, FeatureEntity>(
            "SELECT feature_pk, feature_string FROM feature_example_obj",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entities)
    }

    async fn exists_by_id(&self, id: &str) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM feature_example_obj WHERE feature_pk = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feature_example_obj")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM feature_example_obj WHERE feature_pk = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM feature_example_obj")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
