/// Feature service - builds, persists and projects feature entities
use crate::db::FeatureRepository;
use crate::error::Result;
use crate::models::{FeatureEntity, FeatureResponse};
use std::sync::Arc;

pub struct FeatureService {
    repository: Arc<dyn FeatureRepository>,
}

impl FeatureService {
    pub fn new(repository: Arc<dyn FeatureRepository>) -> Self {
        Self { repository }
    }

    /// Persist one new entity and return its projection.
    ///
    /// The input is accepted but not mapped onto the entity: every call stores
    /// an empty record, so `feature` in the response is always `None`.
    pub async fn handle(&self, input: &str) -> Result<FeatureResponse> {
        tracing::debug!(input_len = input.len(), "Handling feature request");

        let stored = self
            .repository
            .save(FeatureEntity::builder().build())
            .await?;

        tracing::debug!(feature_id = ?stored.id, "Feature entity stored");

        Ok(FeatureResponse::from(stored))
    }
}
