#![cfg(feature = "api")]

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use fitcoach::config::ServerConfig;
use fitcoach::handlers::{self, AppState};

fn state(config: ServerConfig) -> web::Data<Arc<AppState>> {
    web::Data::new(Arc::new(AppState::new(config)))
}

fn seeded_config() -> ServerConfig {
    ServerConfig {
        routine_seed: Some(42),
        ..ServerConfig::default()
    }
}

fn sample_weight_data(count: usize) -> Value {
    let weights = [70.0, 69.8, 69.5, 69.7, 69.3, 69.1, 68.9];
    let records: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "date": format!("2025-01-{:02}", i + 1),
                "weight": weights[i % weights.len()],
            })
        })
        .collect();
    Value::Array(records)
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["status"], "ok");
    assert!(resp["timestamp"].is_string());
}

#[actix_web::test]
async fn test_generate_routine_covers_every_day() {
    let app = test::init_service(
        App::new()
            .app_data(state(seeded_config()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/generate-routine")
        .set_json(json!({
            "fitness_level": "intermediate",
            "goal": "muscle_gain",
            "available_days": 3,
            "time_per_session": 60,
            "preferred_days": ["Friday", "Tuesday", "Monday"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let week = body["weekly_routine"].as_object().unwrap();
    assert_eq!(week.len(), 7);

    let mut workout_days: Vec<&String> = week
        .iter()
        .filter(|(_, plan)| plan["type"] == "workout")
        .map(|(day, _)| day)
        .collect();
    workout_days.sort();
    assert_eq!(workout_days, vec!["Friday", "Monday", "Tuesday"]);
    assert_eq!(
        week["Monday"]["exercises"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["focus"].as_str())
            .next(),
        Some("upper body")
    );
    assert_eq!(body["user_profile"]["goal"], "muscle_gain");
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_generate_routine_defaults_applied() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/generate-routine")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user_profile"]["fitness_level"], "beginner");
    assert_eq!(body["user_profile"]["available_days"], 3);
    assert_eq!(body["user_profile"]["time_per_session"], 60);
}

#[actix_web::test]
async fn test_generate_routine_rejects_unknown_goal() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/generate-routine")
        .set_json(json!({ "goal": "flexibility" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_generate_routine_rejects_long_session() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/generate-routine")
        .set_json(json!({ "time_per_session": 601 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_predict_weight_sample_series() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/predict-weight")
        .set_json(json!({ "weight_data": sample_weight_data(7), "days_ahead": 7 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["input_data_count"], 7);
    assert_eq!(body["prediction_days"], 7);

    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 7);
    assert_eq!(predictions[0]["date"], "2025-01-08");
    assert_eq!(predictions[6]["date"], "2025-01-14");

    let weights: Vec<f64> = predictions
        .iter()
        .map(|p| p["predicted_weight"].as_f64().unwrap())
        .collect();
    let expected = [69.1, 69.1, 69.2, 69.3, 69.6, 70.0, 70.7];
    for (got, want) in weights.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-9, "got {}, want {}", got, want);
    }
}

#[actix_web::test]
async fn test_predict_weight_default_horizon() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/predict-weight")
        .set_json(json!({ "weight_data": sample_weight_data(6) }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["prediction_days"], 14);
    assert_eq!(body["predictions"].as_array().unwrap().len(), 14);
}

#[actix_web::test]
async fn test_predict_weight_requires_five_records() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/predict-weight")
        .set_json(json!({ "weight_data": sample_weight_data(4), "days_ahead": 7 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_predict_weight_horizon_bounds() {
    let config = ServerConfig {
        max_prediction_days: 30,
        ..ServerConfig::default()
    };
    let app = test::init_service(
        App::new()
            .app_data(state(config))
            .configure(handlers::configure),
    )
    .await;

    for days in [0, 31] {
        let req = test::TestRequest::post()
            .uri("/ai/predict-weight")
            .set_json(json!({ "weight_data": sample_weight_data(7), "days_ahead": days }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "days_ahead={}", days);
    }
}

#[actix_web::test]
async fn test_malformed_json() {
    let app = test::init_service(
        App::new()
            .app_data(state(ServerConfig::default()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/predict-weight")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"weight_data\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_self_test_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(state(seeded_config()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/ai/test").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["routine_test"]["status"], "success");
    assert_eq!(body["routine_test"]["sample_routine"]["user_profile"]["goal"], "weight_loss");
    assert_eq!(body["weight_prediction_test"]["status"], "success");

    let predictions = body["weight_prediction_test"]["sample_predictions"]
        .as_array()
        .unwrap();
    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[0]["predicted_weight"], 69.1);
}

#[actix_web::test]
async fn test_generate_routine_keeps_scheduling_order() {
    let app = test::init_service(
        App::new()
            .app_data(state(seeded_config()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/generate-routine")
        .set_json(json!({
            "available_days": 2,
            "preferred_days": ["sat", "Tuesday"]
        }))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).unwrap();

    let position = |day: &str| text.find(&format!("\"{}\":{{", day)).unwrap();
    assert!(position("Saturday") < position("Tuesday"));
    assert!(position("Tuesday") < position("Monday"));
    assert!(position("Monday") < position("Sunday"));
}
