//! Data loading and feature engineering modules

pub mod csv_loader;
pub mod features;

// Re-export commonly used types
pub use csv_loader::load_weight_records;
pub use features::{feature_matrix, prepare_features, WeightFeatures, FEATURE_NAMES};
