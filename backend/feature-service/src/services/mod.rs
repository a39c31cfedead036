/// Business logic layer
pub mod feature;

pub use feature::FeatureService;
