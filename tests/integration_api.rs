//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_budget::api::{AppState, router};
use solar_budget::config::{cabin, workshop};
use solar_budget::household::Household;
use solar_budget::io::codec;
use solar_budget::sim::types::SimConfig;

fn build_app(household: Household) -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(household, SimConfig::new(3)));
    let app = router(Arc::clone(&state));
    (state, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn put_household_replaces_configuration() {
    let (state, app) = build_app(cabin());

    let json = codec::to_json_string(&workshop()).unwrap();
    let (status, _) = send(&app, "PUT", "/household", Some(json)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.household(), workshop());

    let (status, body) = send(&app, "GET", "/household", None).await;
    assert_eq!(status, StatusCode::OK);
    let restored = codec::from_json_str(std::str::from_utf8(&body).unwrap()).unwrap();
    assert_eq!(restored, workshop());
}

#[tokio::test]
async fn put_invalid_household_is_rejected_and_keeps_state() {
    let (state, app) = build_app(cabin());

    let mut value: serde_json::Value =
        serde_json::from_str(&codec::to_json_string(&workshop()).unwrap()).unwrap();
    value["sunset"] = serde_json::Value::from("25:00");
    let (status, body) = send(&app, "PUT", "/household", Some(value.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("$.sunset"));
    assert_eq!(state.household(), cabin());
}

#[tokio::test]
async fn appliance_edits_change_consumption() {
    let (_, app) = build_app(cabin());

    let kettle = r#"{"name": "Kettle", "power": 1200, "priority": "Medium",
                     "start_time": "07:00", "end_time": "08:00", "min_runtime": 1}"#;
    let (status, body) = send(&app, "POST", "/appliances", Some(kettle.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["start_time"], "07:00");

    let (_, body) = send(&app, "GET", "/consumption", None).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_power_w"], 1975.0);

    let (status, _) = send(&app, "DELETE", "/appliances/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/consumption", None).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_power_w"], 1475.0);
}

#[tokio::test]
async fn invalid_appliance_returns_400() {
    let (state, app) = build_app(cabin());

    let bad = r#"{"name": "Kettle", "power": -5, "priority": "Medium",
                  "start_time": "07:00", "end_time": "08:00", "min_runtime": 1}"#;
    let (status, _) = send(&app, "POST", "/appliances", Some(bad.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.household().appliances.len(), 4);
}

#[tokio::test]
async fn simulate_returns_results_and_summary() {
    let (_, app) = build_app(cabin());

    let (status, body) = send(&app, "POST", "/simulate?days=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 48);
    assert_eq!(results[47]["day"], 1);
    assert_eq!(results[47]["hour"], 23);
    assert_eq!(json["summary"]["days"], 2);

    let expected = cabin().run_simulation(2).unwrap();
    assert_eq!(
        results[8]["battery_charge"].as_f64().unwrap(),
        expected[8].battery_charge
    );
}

#[tokio::test]
async fn simulate_after_removing_all_appliances_returns_422() {
    let (_, app) = build_app(cabin());

    for _ in 0..4 {
        let (status, _) = send(&app, "DELETE", "/appliances/0", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let (status, _) = send(&app, "DELETE", "/appliances/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/simulate", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("no appliances"));

    let (status, _) = send(&app, "POST", "/simulate?days=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
