use thiserror::Error;

/// Errors raised by routine generation and weight prediction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoachError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Data error: {0}")]
    Data(String),
}

#[cfg(feature = "api")]
pub use api::*;

#[cfg(feature = "api")]
mod api {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};
    use std::fmt;

    use super::CoachError;
    use crate::models::ErrorResponse;

    /// Upper bound on a single session length in minutes
    pub const MAX_SESSION_MINUTES: u32 = 600;

    /// Application error types
    #[derive(Debug)]
    pub enum AppError {
        /// Invalid request data
        ValidationError(String),
        /// Model or prediction error
        PredictionError(String),
        /// Internal server error
        InternalError(String),
    }

    impl fmt::Display for AppError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
                AppError::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
                AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            }
        }
    }

    impl std::error::Error for AppError {}

    impl From<CoachError> for AppError {
        fn from(err: CoachError) -> Self {
            match err {
                CoachError::InvalidInput(msg) => AppError::ValidationError(msg),
                CoachError::PreconditionViolation(msg) => AppError::PredictionError(msg),
                CoachError::Data(msg) => AppError::InternalError(msg),
            }
        }
    }

    impl ResponseError for AppError {
        fn status_code(&self) -> StatusCode {
            match self {
                AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
                AppError::PredictionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            let (error_code, message) = match self {
                AppError::ValidationError(msg) => ("validation_error", msg.clone()),
                AppError::PredictionError(msg) => ("prediction_error", msg.clone()),
                AppError::InternalError(msg) => ("internal_error", msg.clone()),
            };

            HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: error_code.to_string(),
                message,
            })
        }
    }

    /// Validation functions
    pub fn validate_weight_history(count: usize) -> Result<(), AppError> {
        if count < crate::predictor::MIN_TRAINING_RECORDS {
            return Err(AppError::ValidationError(format!(
                "At least {} weight records are required, got {}",
                crate::predictor::MIN_TRAINING_RECORDS,
                count
            )));
        }
        Ok(())
    }

    pub fn validate_days_ahead(days: u32, max_days: u32) -> Result<(), AppError> {
        if !(1..=max_days).contains(&days) {
            return Err(AppError::ValidationError(format!(
                "days_ahead must be between 1 and {}, got {}",
                max_days, days
            )));
        }
        Ok(())
    }

    pub fn validate_session_minutes(minutes: u32) -> Result<(), AppError> {
        if minutes > MAX_SESSION_MINUTES {
            return Err(AppError::ValidationError(format!(
                "time_per_session must be at most {} minutes, got {}",
                MAX_SESSION_MINUTES, minutes
            )));
        }
        Ok(())
    }

}
