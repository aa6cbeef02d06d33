//! HTTP handlers and route registration

pub mod health;
pub mod predict;
pub mod routine;
pub mod selftest;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::config::ServerConfig;
use crate::core::routine::RoutineGenerator;
use crate::error::AppError;

/// Application state shared across handlers
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Fresh generator per request, deterministic when a seed is configured
    pub fn routine_generator(&self) -> RoutineGenerator {
        match self.config.routine_seed {
            Some(seed) => RoutineGenerator::seeded(seed),
            None => RoutineGenerator::new(),
        }
    }
}

/// Register all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/ai")
                .route("/generate-routine", web::post().to(routine::generate_routine))
                .route("/predict-weight", web::post().to(predict::predict_weight))
                .route("/test", web::get().to(selftest::test_models)),
        );
}

/// Malformed bodies and unknown enum values surface as validation errors
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}
