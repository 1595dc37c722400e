// Core inference pipeline exports
pub mod alignment;
pub mod encoding;
pub mod model;
pub mod pipeline;

pub use alignment::{align_to_schema, dropped_columns};
pub use encoding::{one_hot_column, one_hot_encode};
pub use model::{ChurnModel, ModelError};
pub use pipeline::{predict, decide, round_probability, ChurnPredictor, PredictError, CHURN_THRESHOLD};
