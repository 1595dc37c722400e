//! Churn Predict - customer churn scoring service
//!
//! Loads a pre-trained binary classifier and the ordered list of feature
//! columns it was trained on, then scores one customer record per request.
//! The core of the crate is the feature-alignment step: one-hot encoding a
//! record and projecting it onto the exact column layout the model expects.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{predict, ChurnModel, ChurnPredictor, PredictError, CHURN_THRESHOLD};
pub use models::{RawRecord, PredictionResult, FeatureSchema};
pub use services::{load_predictor, OnnxModel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(CHURN_THRESHOLD, 0.355);
        assert!(FeatureSchema::new(vec!["tenure".to_string()]).is_ok());
    }
}
