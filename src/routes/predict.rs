use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::ChurnPredictor;
use crate::models::{ErrorResponse, HealthResponse, RawRecord};

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub predictor: ChurnPredictor,
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.predictor.model_kind().to_string(),
        features: state.predictor.schema().len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Churn prediction endpoint
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "tenure": 1,
///   "MonthlyCharges": 70.35,
///   "TotalCharges": 70.35,
///   "InternetService": "Fiber optic",
///   "OnlineSecurity": "No",
///   "OnlineBackup": "No",
///   "TechSupport": "No",
///   "Contract": "Month-to-month",
///   "PaymentMethod": "Electronic check"
/// }
/// ```
///
/// Response: `{"prediction": 1, "probability": 0.9635, "threshold": 0.355}`
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<RawRecord>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.predictor.predict(&req) {
        Ok(result) => {
            tracing::debug!(
                "Prediction {} (probability {})",
                result.prediction,
                result.probability
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            tracing::error!("Prediction failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Prediction failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
