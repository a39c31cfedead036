/// Data models for the feature template
///
/// `FeatureEntity` is the persisted row; `FeatureResponse` is the JSON
/// projection returned by the feature endpoint.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Persisted feature record (table `feature_example_obj`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FeatureEntity {
    /// Assigned by the store on first save
    #[sqlx(rename = "feature_pk")]
    pub id: Option<String>,
    pub feature_string: Option<String>,
}

impl FeatureEntity {
    pub fn builder() -> FeatureEntityBuilder {
        FeatureEntityBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct FeatureEntityBuilder {
    id: Option<String>,
    feature_string: Option<String>,
}

impl FeatureEntityBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn feature_string(mut self, feature_string: impl Into<String>) -> Self {
        self.feature_string = Some(feature_string.into());
        self
    }

    pub fn build(self) -> FeatureEntity {
        FeatureEntity {
            id: self.id,
            feature_string: self.feature_string,
        }
    }
}

/// Response body of the feature endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureResponse {
    /// Copied from the stored entity's `feature_string`; `null` when unset
    pub feature: Option<String>,
}

impl From<FeatureEntity> for FeatureResponse {
    fn from(entity: FeatureEntity) -> Self {
        Self {
            feature: entity.feature_string,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_leaves_fields_unset() {
        let entity = FeatureEntity::builder().build();
        assert_eq!(entity, FeatureEntity::default());
        assert!(entity.id.is_none());
        assert!(entity.feature_string.is_none());
    }

    #[test]
    fn test_response_serializes_null_feature() {
        let response = FeatureResponse::from(FeatureEntity::builder().id("abc").build());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "feature": null }));
    }

    #[test]
    fn test_response_copies_feature_string() {
        let entity = FeatureEntity::builder()
            .id("abc")
            .feature_string("hello")
            .build();
        assert_eq!(
            FeatureResponse::from(entity).feature.as_deref(),
            Some("hello")
        );
    }
}
