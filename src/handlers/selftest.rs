use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use super::AppState;
use crate::error::AppError;
use crate::models::{
    FitnessLevel, Goal, SamplePredictions, SampleRoutine, SelfTestResponse, SelfTestSection,
    UserProfile, WeightRecord,
};
use crate::predictor::WeightPredictionModel;

/// Number of sample predictions included in the self-test response
const SAMPLE_PREDICTION_COUNT: usize = 3;

/// One week of sample weigh-ins starting 2025-01-01
pub fn sample_weight_history() -> Vec<WeightRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    [70.0, 69.8, 69.5, 69.7, 69.3, 69.1, 68.9]
        .iter()
        .enumerate()
        .map(|(i, &weight)| WeightRecord {
            date: start + Duration::days(i as i64),
            weight,
        })
        .collect()
}

/// Run both models on fixed sample inputs
pub async fn test_models(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let profile = UserProfile {
        fitness_level: FitnessLevel::Beginner,
        goal: Goal::WeightLoss,
        available_days: 3,
        time_per_session: 45,
        preferred_days: Vec::new(),
    };
    let routine = state.routine_generator().generate_weekly_routine(&profile);

    let history = sample_weight_history();
    let mut model = WeightPredictionModel::new();
    model.train(&history)?;
    let mut predictions = model.predict_future_weight(&history, 7)?;
    predictions.truncate(SAMPLE_PREDICTION_COUNT);

    Ok(HttpResponse::Ok().json(SelfTestResponse {
        routine_test: SelfTestSection {
            status: "success".to_string(),
            payload: SampleRoutine {
                sample_routine: routine,
            },
        },
        weight_prediction_test: SelfTestSection {
            status: "success".to_string(),
            payload: SamplePredictions {
                sample_predictions: predictions,
            },
        },
    }))
}
