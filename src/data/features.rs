//! Feature Engineering
//!
//! Derive regression features from a weight history: day offset from the first
//! measurement plus trailing 3- and 7-record moving averages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WeightRecord;

/// Short moving-average window (records)
pub const SHORT_WINDOW: usize = 3;
/// Long moving-average window (records)
pub const LONG_WINDOW: usize = 7;

/// Column order of [`WeightFeatures::to_vec`]
pub const FEATURE_NAMES: [&str; 3] = ["days_since_start", "weight_ma_3", "weight_ma_7"];

/// One weight record with its derived features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFeatures {
    pub date: NaiveDate,
    pub weight: f64,
    pub days_since_start: i64,
    pub weight_ma_3: f64,
    pub weight_ma_7: f64,
}

impl WeightFeatures {
    /// Convert features to a flat vector for model input
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.days_since_start as f64,
            self.weight_ma_3,
            self.weight_ma_7,
        ]
    }
}

/// Sort records by date and derive features
///
/// The sort is stable, so records sharing a date keep their input order and
/// each one counts toward the moving averages. Leading rows average over the
/// records available so far.
pub fn prepare_features(records: &[WeightRecord]) -> Vec<WeightFeatures> {
    let mut sorted: Vec<&WeightRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let Some(start) = sorted.first().map(|r| r.date) else {
        return Vec::new();
    };
    let weights: Vec<f64> = sorted.iter().map(|r| r.weight).collect();

    sorted
        .iter()
        .enumerate()
        .map(|(i, record)| WeightFeatures {
            date: record.date,
            weight: record.weight,
            days_since_start: (record.date - start).num_days(),
            weight_ma_3: trailing_mean(&weights, i, SHORT_WINDOW),
            weight_ma_7: trailing_mean(&weights, i, LONG_WINDOW),
        })
        .collect()
}

/// Feature matrix and target vector for training
pub fn feature_matrix(features: &[WeightFeatures]) -> (Vec<Vec<f64>>, Vec<f64>) {
    features
        .iter()
        .map(|f| (f.to_vec(), f.weight))
        .unzip()
}

/// Mean of up to `window` values ending at `index`
fn trailing_mean(values: &[f64], index: usize, window: usize) -> f64 {
    let start = (index + 1).saturating_sub(window);
    let slice = &values[start..=index];
    slice.iter().sum::<f64>() / slice.len() as f64
}
