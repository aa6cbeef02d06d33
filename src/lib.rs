//! Fitcoach - Fitness coaching backend
//!
//! This library provides:
//! - Weekly workout routine generation from a user profile
//! - Linear-trend weight prediction from a weight history
//! - Weight-history CSV loading
//! - A supervisor that runs the API server next to the frontend dev server
//!
//! # Example
//!
//! ```no_run
//! use fitcoach::core::routine::RoutineGenerator;
//! use fitcoach::models::{Goal, UserProfile};
//!
//! let profile = UserProfile {
//!     goal: Goal::MuscleGain,
//!     ..UserProfile::default()
//! };
//! let plan = RoutineGenerator::seeded(7).generate_weekly_routine(&profile);
//! for (day, daily) in &plan.weekly_routine {
//!     println!("{}: {} exercises", day, daily.exercises.len());
//! }
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod launcher;
pub mod models;
pub mod predictor;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod handlers;

// Re-export commonly used types
pub use crate::core::routine::RoutineGenerator;
pub use data::{load_weight_records, prepare_features, WeightFeatures};
pub use error::CoachError;
pub use models::{
    DailyPlan, Exercise, FitnessLevel, Goal, PredictionPoint, RoutinePlan, UserProfile, Weekday,
    WeeklyRoutine, WeightRecord,
};
pub use predictor::WeightPredictionModel;
