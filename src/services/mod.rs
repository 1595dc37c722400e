// Service exports
pub mod artifact;
pub mod loader;
pub mod schema;

pub use artifact::{OnnxModel, ArtifactError, PROBABILITIES_OUTPUT};
pub use loader::{load_predictor, StartupError};
pub use schema::{load_feature_schema, SchemaLoadError};
