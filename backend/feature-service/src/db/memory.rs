/// In-process feature store
///
/// Used when the service runs with `FEATURE_STORE=memory` and by the HTTP
/// tests. `set_available(false)` makes every operation fail with
/// `RepositoryError::Unavailable`, which is how a store outage is simulated.
use super::feature_repo::{generate_id, FeatureRepository, RepositoryError, RepositoryResult};
use crate::models::FeatureEntity;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct InMemoryFeatureRepository {
    entities: DashMap<String, FeatureEntity>,
    available: AtomicBool,
}

impl Default for InMemoryFeatureRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFeatureRepository {
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> RepositoryResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }
}

#[async_trait]
impl FeatureRepository for InMemoryFeatureRepository {
    async fn save(&self, entity: FeatureEntity) -> RepositoryResult<FeatureEntity> {
        self.ensure_available()?;

        let id = entity.id.unwrap_or_else(generate_id);
        let stored = FeatureEntity {
            id: Some(id.clone()),
            feature_string: entity.feature_string,
        };
        self.entities.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<FeatureEntity>> {
        self.ensure_available()?;
        Ok(self.entities.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<FeatureEntity>> {
        self.ensure_available()?;
        Ok(self
            .entities
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn exists_by_id(&self, id: &str) -> RepositoryResult<bool> {
        self.ensure_available()?;
        Ok(self.entities.contains_key(id))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.ensure_available()?;
        Ok(self.entities.len() as u64)
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        self.ensure_available()?;
        self.entities.remove(id);
        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.ensure_available()?;
        self.entities.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_id_when_absent() {
        let repo = InMemoryFeatureRepository::new();

        let stored = repo.save(FeatureEntity::builder().build()).await.unwrap();

        let id = stored.id.clone().unwrap();
        assert!(!id.is_empty());
        assert!(stored.feature_string.is_none());
        assert_eq!(repo.find_by_id(&id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_repeated_saves_create_distinct_records() {
        let repo = InMemoryFeatureRepository::new();

        let first = repo.save(FeatureEntity::default()).await.unwrap();
        let second = repo.save(FeatureEntity::default()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_with_existing_id_updates() {
        let repo = InMemoryFeatureRepository::new();
        let stored = repo.save(FeatureEntity::default()).await.unwrap();
        let id = stored.id.unwrap();

        let updated = repo
            .save(FeatureEntity::builder().id(id.clone()).feature_string("v2").build())
            .await
            .unwrap();

        assert_eq!(updated.feature_string.as_deref(), Some("v2"));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            repo.find_by_id(&id).await.unwrap().unwrap().feature_string.as_deref(),
            Some("v2")
        );
    }

    #[tokio::test]
    async fn test_exists_find_all_and_delete() {
        let repo = InMemoryFeatureRepository::new();
        let a = repo.save(FeatureEntity::default()).await.unwrap().id.unwrap();
        let b = repo.save(FeatureEntity::default()).await.unwrap().id.unwrap();

        assert!(repo.exists_by_id(&a).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        repo.delete_by_id(&a).await.unwrap();
        assert!(!repo.exists_by_id(&a).await.unwrap());
        assert!(repo.find_by_id(&a).await.unwrap().is_none());

        // deleting twice is fine
        repo.delete_by_id(&a).await.unwrap();

        repo.delete_all().await.unwrap();
        assert!(!repo.exists_by_id(&b).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let repo = InMemoryFeatureRepository::new();
        repo.set_available(false);

        assert!(matches!(
            repo.save(FeatureEntity::default()).await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(repo.count().await.is_err());
        assert!(repo.find_all().await.is_err());

        repo.set_available(true);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
