use thiserror::Error;

/// Errors raised while scoring a feature vector
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("model expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("model produced no `{0}` output")]
    MissingOutput(String),

    #[error("model returned {actual} class scores, expected {expected}")]
    UnexpectedOutput { expected: usize, actual: usize },
}

/// Binary classifier used by the inference pipeline
///
/// Implementations are loaded once at startup and shared across workers, so
/// scoring must not mutate the model.
pub trait ChurnModel: Send + Sync {
    /// Short name of the model format, e.g. `onnx`
    fn kind(&self) -> &str;

    /// Number of positional inputs the model was trained on
    fn n_features(&self) -> usize;

    /// Class probabilities `[p_stay, p_churn]` for a single row
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError>;
}

/// Fail fast when a row does not have the trained width
pub(crate) fn check_dimension(expected: usize, row: &[f64]) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
