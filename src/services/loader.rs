use crate::core::{ChurnModel, ChurnPredictor, PredictError};
use crate::services::artifact::{ArtifactError, OnnxModel};
use crate::services::schema::{load_feature_schema, SchemaLoadError};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that stop the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Schema(#[from] SchemaLoadError),

    #[error(transparent)]
    Mismatch(#[from] PredictError),
}

/// Load the model artifact and feature schema and pair them up
///
/// Runs once before the server binds. Any failure is fatal.
pub fn load_predictor<P, Q>(artifact_path: P, features_path: Q) -> Result<ChurnPredictor, StartupError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let artifact = OnnxModel::load(artifact_path.as_ref())?;
    tracing::info!(
        "Model artifact loaded from {} ({})",
        artifact_path.as_ref().display(),
        artifact.kind()
    );

    let schema = load_feature_schema(features_path.as_ref())?;
    tracing::info!(
        "Feature schema loaded from {} ({} columns)",
        features_path.as_ref().display(),
        schema.len()
    );

    let model: Arc<dyn ChurnModel> = Arc::new(artifact);
    Ok(ChurnPredictor::new(model, schema)?)
}
