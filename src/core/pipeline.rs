use crate::core::{
    alignment::{align_to_schema, dropped_columns},
    encoding::one_hot_encode,
    model::{ChurnModel, ModelError},
};
use crate::models::{AlignedFeatureVector, FeatureSchema, PredictionResult, RawRecord};
use std::sync::Arc;
use thiserror::Error;

/// Decision threshold the model was calibrated with. Not tunable.
pub const CHURN_THRESHOLD: f64 = 0.355;

/// Decimal places kept in the reported probability
pub const PROBABILITY_DECIMALS: i32 = 4;

/// Errors that can occur while running the inference pipeline
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("model returned an invalid churn probability: {0}")]
    InvalidProbability(f64),

    #[error("feature schema has {schema} columns but the model expects {model}")]
    SchemaMismatch { schema: usize, model: usize },
}

/// Encode, align, score and threshold a single record
///
/// Pure function of its inputs: the same record against the same schema and
/// model always yields the same result.
pub fn predict(
    raw: &RawRecord,
    schema: &FeatureSchema,
    model: &dyn ChurnModel,
) -> Result<PredictionResult, PredictError> {
    let encoded = one_hot_encode(raw);
    let aligned = align_to_schema(&encoded, schema);

    let probability = churn_probability(model, &aligned)?;

    tracing::debug!(
        probability,
        unseen = ?dropped_columns(&encoded, schema),
        "Scored record"
    );

    Ok(decide(probability))
}

/// Positive-class probability for an aligned row
pub fn churn_probability(
    model: &dyn ChurnModel,
    aligned: &AlignedFeatureVector,
) -> Result<f64, PredictError> {
    let [_, churn] = model.predict_proba(aligned.as_slice())?;

    if !churn.is_finite() || !(0.0..=1.0).contains(&churn) {
        return Err(PredictError::InvalidProbability(churn));
    }

    Ok(churn)
}

/// Apply the threshold to the unrounded probability, then round for output
#[inline]
pub fn decide(probability: f64) -> PredictionResult {
    PredictionResult {
        prediction: u8::from(probability > CHURN_THRESHOLD),
        probability: round_probability(probability),
        threshold: CHURN_THRESHOLD,
    }
}

#[inline]
pub fn round_probability(probability: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DECIMALS);
    (probability * scale).round() / scale
}

/// Process-wide model and schema, built once at startup
///
/// Cheap to clone: both halves are shared behind `Arc` and never mutated.
#[derive(Clone)]
pub struct ChurnPredictor {
    model: Arc<dyn ChurnModel>,
    schema: Arc<FeatureSchema>,
}

impl ChurnPredictor {
    /// Pair a model with its schema, refusing a width mismatch
    pub fn new(model: Arc<dyn ChurnModel>, schema: FeatureSchema) -> Result<Self, PredictError> {
        if model.n_features() != schema.len() {
            return Err(PredictError::SchemaMismatch {
                schema: schema.len(),
                model: model.n_features(),
            });
        }

        Ok(Self {
            model,
            schema: Arc::new(schema),
        })
    }

    pub fn predict(&self, raw: &RawRecord) -> Result<PredictionResult, PredictError> {
        predict(raw, &self.schema, self.model.as_ref())
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model_kind(&self) -> &str {
        self.model.kind()
    }
}

impl std::fmt::Debug for ChurnPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChurnPredictor")
            .field("model", &self.model.kind())
            .field("features", &self.schema.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::check_dimension;

    /// Returns a fixed probability regardless of input
    struct FixedModel {
        width: usize,
        churn: f64,
    }

    impl ChurnModel for FixedModel {
        fn kind(&self) -> &str {
            "fixed"
        }

        fn n_features(&self) -> usize {
            self.width
        }

        fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
            check_dimension(self.width, row)?;
            Ok([1.0 - self.churn, self.churn])
        }
    }

    /// Churn probability equals the first input column
    struct EchoModel;

    impl ChurnModel for EchoModel {
        fn kind(&self) -> &str {
            "echo"
        }

        fn n_features(&self) -> usize {
            2
        }

        fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
            check_dimension(2, row)?;
            Ok([1.0 - row[0], row[0]])
        }
    }

    fn record(contract: &str) -> RawRecord {
        RawRecord {
            tenure: 3,
            monthly_charges: 80.0,
            total_charges: 240.0,
            internet_service: "Fiber optic".to_string(),
            online_security: "No".to_string(),
            online_backup: "No".to_string(),
            tech_support: "No".to_string(),
            contract: contract.to_string(),
            payment_method: "Electronic check".to_string(),
        }
    }

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        assert_eq!(decide(CHURN_THRESHOLD).prediction, 0);
        assert_eq!(decide(0.35500001).prediction, 1);
        assert_eq!(decide(0.1).prediction, 0);
        assert_eq!(decide(0.9).prediction, 1);
    }

    #[test]
    fn test_threshold_uses_unrounded_probability() {
        // Rounds to 0.355 but is above the cutoff
        let result = decide(0.35504);
        assert_eq!(result.probability, 0.355);
        assert_eq!(result.prediction, 1);

        // Exactly at the cutoff stays below it
        let result = decide(0.355);
        assert_eq!(result.prediction, 0);
    }

    #[test]
    fn test_round_probability() {
        assert_eq!(round_probability(0.123456), 0.1235);
        assert_eq!(round_probability(0.99996), 1.0);
        assert_eq!(round_probability(0.0), 0.0);
        assert_eq!(round_probability(0.5), 0.5);
    }

    #[test]
    fn test_threshold_reported() {
        assert_eq!(decide(0.2).threshold, 0.355);
    }

    #[test]
    fn test_predict_uses_aligned_position() {
        // Column 0 is the contract indicator, so only a month-to-month record scores 1.0
        let schema = schema(&["Contract_Month-to-month", "tenure"]);

        let churner = predict(&record("Month-to-month"), &schema, &EchoModel).unwrap();
        assert_eq!(churner.prediction, 1);
        assert_eq!(churner.probability, 1.0);

        let stayer = predict(&record("Two year"), &schema, &EchoModel).unwrap();
        assert_eq!(stayer.prediction, 0);
        assert_eq!(stayer.probability, 0.0);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let schema = schema(&["Contract_Month-to-month", "tenure"]);
        let first = predict(&record("Month-to-month"), &schema, &EchoModel).unwrap();
        let second = predict(&record("Month-to-month"), &schema, &EchoModel).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_probability_is_an_error() {
        let schema = schema(&["tenure"]);
        for churn in [f64::NAN, 1.5, -0.1] {
            let model = FixedModel { width: 1, churn };
            let err = predict(&record("One year"), &schema, &model).unwrap_err();
            assert!(matches!(err, PredictError::InvalidProbability(_)));
        }
    }

    #[test]
    fn test_dimension_mismatch_surfaces() {
        let schema = schema(&["tenure", "MonthlyCharges"]);
        let model = FixedModel { width: 5, churn: 0.5 };
        let err = predict(&record("One year"), &schema, &model).unwrap_err();
        assert_eq!(
            err,
            PredictError::Model(ModelError::DimensionMismatch { expected: 5, actual: 2 })
        );
    }

    #[test]
    fn test_predictor_rejects_width_mismatch() {
        let model: Arc<dyn ChurnModel> = Arc::new(FixedModel { width: 3, churn: 0.5 });
        let err = ChurnPredictor::new(model, schema(&["tenure"])).unwrap_err();
        assert_eq!(err, PredictError::SchemaMismatch { schema: 1, model: 3 });
    }

    #[test]
    fn test_predictor_predicts() {
        let model: Arc<dyn ChurnModel> = Arc::new(FixedModel { width: 1, churn: 0.61237 });
        let predictor = ChurnPredictor::new(model, schema(&["tenure"])).unwrap();

        let result = predictor.predict(&record("One year")).unwrap();
        assert_eq!(result, PredictionResult { prediction: 1, probability: 0.6124, threshold: 0.355 });
        assert_eq!(predictor.model_kind(), "fixed");
        assert_eq!(predictor.schema().len(), 1);
    }
}
