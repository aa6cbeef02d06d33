//! Core business logic modules

pub mod catalog;
pub mod regression;
pub mod routine;

// Re-export commonly used types
pub use regression::{LinearRegression, StandardScaler};
pub use routine::{generate_recommendations, optimize_muscle_gain_schedule, RoutineGenerator};
