use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::error::{validate_days_ahead, validate_weight_history, AppError};
use crate::models::{PredictWeightRequest, PredictWeightResponse};
use crate::predictor::WeightPredictionModel;

/// Train on the submitted history and extrapolate future weight
pub async fn predict_weight(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictWeightRequest>,
) -> Result<HttpResponse, AppError> {
    validate_weight_history(req.weight_data.len())?;
    validate_days_ahead(req.days_ahead, state.config.max_prediction_days)?;

    info!(
        "Predicting weight: {} records, {} days ahead",
        req.weight_data.len(),
        req.days_ahead
    );

    // No model state is kept between requests
    let mut model = WeightPredictionModel::new();
    model.train(&req.weight_data)?;
    let predictions = model.predict_future_weight(&req.weight_data, req.days_ahead)?;

    Ok(HttpResponse::Ok().json(PredictWeightResponse {
        predictions,
        input_data_count: req.weight_data.len(),
        prediction_days: req.days_ahead,
    }))
}
