// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FeatureSchema, SchemaError, EncodedRecord, AlignedFeatureVector};
pub use requests::RawRecord;
pub use responses::{PredictionResult, HealthResponse, ErrorResponse};
