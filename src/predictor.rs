use chrono::Duration;
use tracing::{debug, info};

use crate::core::regression::{LinearRegression, StandardScaler};
use crate::data::features::{feature_matrix, prepare_features};
use crate::error::CoachError;
use crate::models::{PredictionPoint, WeightRecord};

/// Minimum number of weight records required for training
pub const MIN_TRAINING_RECORDS: usize = 5;
/// Longest forecast horizon in days
pub const MAX_DAYS_AHEAD: u32 = 3650;

/// Scaler and regression fitted together on one history
#[derive(Debug, Clone)]
struct FittedModel {
    scaler: StandardScaler,
    regression: LinearRegression,
}

/// Linear-trend weight predictor
///
/// Starts untrained; [`train`](Self::train) fits it and only then does
/// [`predict_future_weight`](Self::predict_future_weight) succeed.
#[derive(Debug, Clone, Default)]
pub struct WeightPredictionModel {
    fitted: Option<FittedModel>,
}

impl WeightPredictionModel {
    pub fn new() -> Self {
        Self { fitted: None }
    }

    pub fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit the model on a weight history
    ///
    /// Features are `[days_since_start, weight_ma_3, weight_ma_7]`, standardized
    /// with statistics of this history, and the target is the recorded weight.
    /// Training again replaces the previous fit.
    pub fn train(&mut self, records: &[WeightRecord]) -> Result<&mut Self, CoachError> {
        if records.len() < MIN_TRAINING_RECORDS {
            return Err(CoachError::InvalidInput(format!(
                "At least {} weight records are required for training, got {}",
                MIN_TRAINING_RECORDS,
                records.len()
            )));
        }
        if let Some(bad) = records
            .iter()
            .find(|r| !r.weight.is_finite() || r.weight <= 0.0)
        {
            return Err(CoachError::InvalidInput(format!(
                "Weight must be a positive number, got {} on {}",
                bad.weight, bad.date
            )));
        }

        let features = prepare_features(records);
        let (x, y) = feature_matrix(&features);

        let scaler = StandardScaler::fit(&x)?;
        let regression = LinearRegression::fit(&scaler.transform_all(&x), &y)?;

        debug!(
            "Fitted weight model: coefficients={:?}, intercept={:.4}",
            regression.coefficients, regression.intercept
        );
        info!("Trained weight model on {} records", records.len());

        self.fitted = Some(FittedModel { scaler, regression });
        Ok(self)
    }

    /// Extrapolate weight for `days_ahead` days after the latest record
    ///
    /// Each step feeds its prediction back into the moving averages:
    /// `ma3 = (2 * ma3 + p) / 3` and `ma7 = (6 * ma7 + p) / 7`. Raw history is
    /// never revisited once extrapolation starts. Outputs are rounded to one
    /// decimal; the feedback uses the unrounded value.
    pub fn predict_future_weight(
        &self,
        records: &[WeightRecord],
        days_ahead: u32,
    ) -> Result<Vec<PredictionPoint>, CoachError> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            CoachError::PreconditionViolation(
                "Model has not been trained; call train before predicting".to_string(),
            )
        })?;

        if !(1..=MAX_DAYS_AHEAD).contains(&days_ahead) {
            return Err(CoachError::InvalidInput(format!(
                "days_ahead must be between 1 and {}, got {}",
                MAX_DAYS_AHEAD, days_ahead
            )));
        }

        let features = prepare_features(records);
        let seed = features.last().ok_or_else(|| {
            CoachError::InvalidInput("Weight history is empty".to_string())
        })?;

        let mut ma3 = seed.weight_ma_3;
        let mut ma7 = seed.weight_ma_7;
        let mut predictions = Vec::with_capacity(days_ahead as usize);

        for day in 1..=days_ahead {
            let row = [(seed.days_since_start + day as i64) as f64, ma3, ma7];
            let predicted = fitted.regression.predict(&fitted.scaler.transform(&row));

            let date = seed
                .date
                .checked_add_signed(Duration::days(day as i64))
                .ok_or_else(|| {
                    CoachError::InvalidInput(format!(
                        "Forecast date {} days after {} is out of range",
                        day, seed.date
                    ))
                })?;
            predictions.push(PredictionPoint {
                date,
                predicted_weight: round_to_tenth(predicted),
            });

            ma3 = (ma3 * 2.0 + predicted) / 3.0;
            ma7 = (ma7 * 6.0 + predicted) / 7.0;
        }

        Ok(predictions)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
