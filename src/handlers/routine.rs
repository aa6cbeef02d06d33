use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::error::{validate_session_minutes, AppError};
use crate::models::UserProfile;

/// Generate a weekly workout routine from a user profile
pub async fn generate_routine(
    state: web::Data<Arc<AppState>>,
    profile: web::Json<UserProfile>,
) -> Result<HttpResponse, AppError> {
    validate_session_minutes(profile.time_per_session)?;

    info!(
        "Generating routine: level={}, goal={}, days={}, minutes={}",
        profile.fitness_level, profile.goal, profile.available_days, profile.time_per_session
    );

    let plan = state.routine_generator().generate_weekly_routine(&profile);

    Ok(HttpResponse::Ok().json(plan))
}
