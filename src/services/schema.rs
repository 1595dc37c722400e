use crate::models::{FeatureSchema, SchemaError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the feature schema file
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read feature schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feature schema {path} is not a JSON list of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature schema {path} is invalid: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

/// Load the ordered feature names from a JSON array file
pub fn load_feature_schema<P: AsRef<Path>>(path: P) -> Result<FeatureSchema, SchemaLoadError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let columns: Vec<String> =
        serde_json::from_str(&contents).map_err(|source| SchemaLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    FeatureSchema::new(columns).map_err(|source| SchemaLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
