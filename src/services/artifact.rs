use crate::core::model::{check_dimension, ChurnModel, ModelError};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::tensor::TensorElementType;
use ort::value::{Tensor, ValueType};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output holding `[p_stay, p_churn]` per row
pub const PROBABILITIES_OUTPUT: &str = "probabilities";

/// Errors that can occur while loading the model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load model artifact {path}: {message}")]
    Runtime { path: PathBuf, message: String },

    #[error("invalid model artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Exported churn classifier served through ONNX Runtime
///
/// The graph takes one float tensor `[N, F]` and must expose a
/// `probabilities` output of shape `[N, 2]`. Only [`OnnxModel::load`] builds
/// one, after the graph has been checked and scored once.
pub struct OnnxModel {
    session: Session,
    input_name: String,
    n_features: usize,
}

fn runtime(e: ort::Error) -> ModelError {
    ModelError::Runtime(e.to_string())
}

impl OnnxModel {
    /// Load an ONNX file and check it against the serving contract
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let invalid = |reason: String| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.with_intra_threads(1))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| ArtifactError::Runtime {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let input = match session.inputs.as_slice() {
            [input] => input,
            inputs => return Err(invalid(format!("expected one input, found {}", inputs.len()))),
        };

        let n_features = match &input.input_type {
            ValueType::Tensor { ty: TensorElementType::Float32, dimensions, .. }
                if dimensions.len() == 2 && dimensions[1] > 0 =>
            {
                dimensions[1] as usize
            }
            other => {
                return Err(invalid(format!(
                    "input {} must be a float tensor [N, F] with fixed F, found {:?}",
                    input.name, other
                )))
            }
        };

        if !session.outputs.iter().any(|output| output.name == PROBABILITIES_OUTPUT) {
            return Err(invalid(format!("graph has no `{}` output", PROBABILITIES_OUTPUT)));
        }

        let model = Self {
            input_name: input.name.clone(),
            session,
            n_features,
        };

        // Score an all-zero row so shape problems surface before serving
        model
            .predict_proba(&vec![0.0; n_features])
            .map_err(|e| invalid(e.to_string()))?;

        tracing::debug!(
            "Loaded ONNX model from {} (input `{}`, {} features)",
            path.display(),
            model.input_name,
            model.n_features
        );

        Ok(model)
    }
}

impl ChurnModel for OnnxModel {
    fn kind(&self) -> &str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        check_dimension(self.n_features, row)?;

        let values: Vec<f32> = row.iter().map(|&x| x as f32).collect();
        let tensor = Tensor::from_array(([1usize, self.n_features], values)).map_err(runtime)?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor].map_err(runtime)?)
            .map_err(runtime)?;

        let probabilities = outputs
            .get(PROBABILITIES_OUTPUT)
            .ok_or_else(|| ModelError::MissingOutput(PROBABILITIES_OUTPUT.to_string()))?;

        let scores: Vec<f32> = probabilities
            .try_extract_tensor::<f32>()
            .map_err(runtime)?
            .iter()
            .copied()
            .collect();

        match scores.as_slice() {
            [stay, churn] => Ok([f64::from(*stay), f64::from(*churn)]),
            other => Err(ModelError::UnexpectedOutput {
                expected: 2,
                actual: other.len(),
            }),
        }
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input", &self.input_name)
            .field("n_features", &self.n_features)
            .finish()
    }
}
