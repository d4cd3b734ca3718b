// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests against an in-memory session.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// App with the map loaded at London.
async fn app_with_map() -> Router {
    let (app, _state) = common::create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/location",
        Some(json!({"lat": 51.5, "lng": -0.12})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loaded"], true);
    app
}

async fn create_run(app: &Router, distance_km: f64) -> Value {
    let (status, _) = send(
        app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 51.5, "lng": -0.12})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        app,
        "POST",
        "/api/workouts",
        Some(json!({
            "kind": "running",
            "distance_km": distance_km,
            "duration_min": 25.0,
            "cadence_spm": 180.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_click_before_map_loaded_conflicts() {
    let (app, _state) = common::create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 1.0, "lng": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "precondition_failed");
}

#[tokio::test]
async fn test_location_loads_map_once() {
    let app = app_with_map().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/location",
        Some(json!({"lat": 10.0, "lng": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loaded"], false);
    assert_eq!(body["map_ready"], true);
}

#[tokio::test]
async fn test_out_of_range_click_is_bad_request() {
    let app = app_with_map().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 123.0, "lng": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_create_running_workout() {
    let app = app_with_map().await;
    let body = create_run(&app, 5.0).await;

    assert_eq!(body["kind"], "running");
    assert_eq!(body["pace_min_per_km"], 5.0);
    assert_eq!(body["description"], "Running on April 7");

    let (status, list) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], body["id"]);
}

#[tokio::test]
async fn test_submit_without_click_conflicts() {
    let app = app_with_map().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"kind": "cycling", "distance_km": 10.0, "duration_min": 30.0, "elevation_gain_m": 5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "precondition_failed");
}

#[tokio::test]
async fn test_invalid_workout_shows_error_panel() {
    let app = app_with_map().await;
    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 51.5, "lng": -0.12})),
    )
    .await;

    // Missing cadence counts as non-finite
    let (status, body) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"kind": "running", "distance_km": 5.0, "duration_min": 25.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["view"]["error_visible"], true);
    assert_eq!(view["view"]["errors_shown"], 1);
    assert_eq!(view["view"]["entries"].as_array().unwrap().len(), 0);

    let (status, _) = send(&app, "POST", "/api/error/dismiss", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["view"]["error_visible"], false);
}

#[tokio::test]
async fn test_sort_endpoint_orders_by_distance() {
    let app = app_with_map().await;
    create_run(&app, 8.0).await;
    create_run(&app, 3.0).await;
    create_run(&app, 5.0).await;

    let (status, list) = send(&app, "POST", "/api/workouts/sort", None).await;
    assert_eq!(status, StatusCode::OK);
    let distances: Vec<f64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["distance_km"].as_f64().unwrap())
        .collect();
    assert_eq!(distances, vec![3.0, 5.0, 8.0]);

    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["sorted"], true);
}

#[tokio::test]
async fn test_delete_endpoint() {
    let app = app_with_map().await;
    let created = create_run(&app, 5.0).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, body) = send(&app, "DELETE", &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], false);

    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["map"]["markers"].as_object().unwrap().len(), 0);
}

#[tokio::test]
async fn test_focus_endpoint_centers_map() {
    let app = app_with_map().await;
    send(
        &app,
        "POST",
        "/api/map/click",
        Some(json!({"lat": 40.0, "lng": -3.7})),
    )
    .await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({"kind": "cycling", "distance_km": 10.0, "duration_min": 30.0, "elevation_gain_m": 0.0})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, "POST", &format!("/api/workouts/{}/focus", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["focused"], true);

    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["map"]["center"]["lat"], 40.0);
    assert_eq!(view["map"]["center"]["lng"], -3.7);
}

#[tokio::test]
async fn test_geojson_endpoint() {
    let app = app_with_map().await;
    create_run(&app, 5.0).await;

    let (status, body) = send(&app, "GET", "/api/workouts.geojson", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"][0]["geometry"]["type"], "Point");
    assert_eq!(body["features"][0]["geometry"]["coordinates"], json!([-0.12, 51.5]));
}

#[tokio::test]
async fn test_select_kind_and_reset() {
    let app = app_with_map().await;
    create_run(&app, 5.0).await;

    let (status, _) = send(&app, "POST", "/api/form/kind", Some(json!({"kind": "cycling"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "POST", "/api/reset", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(list, json!([]));
    let (_, view) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(view["view"]["extra_field"], "cycling");
    assert_eq!(view["view"]["entries"], json!([]));
}
