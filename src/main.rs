use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fitcoach::config::ServerConfig;
use fitcoach::handlers::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let addr = config.bind_addr();
    if let Some(seed) = config.routine_seed {
        warn!("ROUTINE_SEED={} set; routines are deterministic", seed);
    }

    let cors_origin = config.cors_origin.clone();
    let app_state = Arc::new(AppState::new(config));

    info!("Starting fitness coaching API at http://{}", addr);
    info!("Allowing CORS origin {}", cors_origin);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&addr)?
    .run()
    .await
}
