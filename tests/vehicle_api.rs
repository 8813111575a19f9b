use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vehicle_service::config::EnvironmentConfig;
use vehicle_service::repositories::{InMemoryVehicleRepository, VehicleRepository};
use vehicle_service::{create_app_router, AppState};

// Función helper para crear la app de test
fn create_test_app() -> (Router, InMemoryVehicleRepository) {
    let config = EnvironmentConfig::from_lookup(|key| (key == "STORAGE_BACKEND").then(|| "memory".to_string()))
        .expect("memory config");
    let repository = InMemoryVehicleRepository::new();
    let state = AppState::new(config, Arc::new(repository.clone()));
    (create_app_router(state), repository)
}

fn ford_fiesta() -> Value {
    json!({
        "vin": "V1",
        "manufacturerName": "Ford",
        "description": "d",
        "horsePower": 100,
        "modelName": "Fiesta",
        "purchasePrice": 20000,
        "fuelType": "GASOLINE"
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request builds"))
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    (status, bytes.to_vec())
}

async fn send_raw(app: &Router, method: Method, uri: &str, content_type: Option<&str>, body: &str) -> StatusCode {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).expect("request builds"))
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("error body is JSON");
    assert_eq!(body, json!({ "error": "Malformed JSON request" }));
    status
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("body is JSON")
}

fn assert_same_vehicle(actual: &Value, expected: &Value) {
    for field in ["vin", "manufacturerName", "description", "horsePower", "modelName", "fuelType"] {
        assert_eq!(actual[field], expected[field], "field {field}");
    }
    assert_eq!(actual["purchasePrice"].as_f64(), expected["purchasePrice"].as_f64());
}

#[tokio::test]
async fn test_full_vehicle_lifecycle() {
    let (app, _) = create_test_app();
    let vehicle = ford_fiesta();

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_same_vehicle(&as_json(&body), &vehicle);

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(as_json(&body), json!({ "error": "VIN already exists" }));

    let (status, body) = send(&app, Method::GET, "/vehicle/V1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_same_vehicle(&as_json(&body), &vehicle);

    let (status, body) = send(&app, Method::DELETE, "/vehicle/V1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&app, Method::GET, "/vehicle/V1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_vehicles() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/vehicle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!([]));

    let mut second = ford_fiesta();
    second["vin"] = json!("V2");
    send(&app, Method::POST, "/vehicle", Some(&ford_fiesta())).await;
    send(&app, Method::POST, "/vehicle", Some(&second)).await;

    let (status, body) = send(&app, Method::GET, "/vehicle", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = as_json(&body);
    let vins: Vec<&str> = list
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|v| v["vin"].as_str())
        .collect();
    assert_eq!(vins, vec!["V1", "V2"]);
}

#[tokio::test]
async fn test_create_with_zero_horse_power_is_rejected() {
    let (app, repository) = create_test_app();
    let mut vehicle = ford_fiesta();
    vehicle["horsePower"] = json!(0);

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(as_json(&body), json!({ "horsePower": "Horsepower must be greater than 0" }));
    assert!(repository.find_all().await.expect("list works").is_empty());
}

#[tokio::test]
async fn test_create_without_horse_power_is_accepted() {
    let (app, repository) = create_test_app();
    let mut vehicle = ford_fiesta();
    vehicle.as_object_mut().expect("object").remove("horsePower");

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;

    assert_eq!(status, StatusCode::CREATED);
    let created = as_json(&body);
    assert!(created["horsePower"].is_null());
    assert_eq!(created["modelName"], "Fiesta");

    let stored = repository.find_by_id("V1").await.expect("lookup works").expect("stored");
    assert_eq!(stored.horse_power, None);
}

#[tokio::test]
async fn test_price_round_trips_without_rounding() {
    let (app, _) = create_test_app();

    for (vin, price) in [("V1", "12345678901234567.89"), ("V2", "19999.999999999999")] {
        let mut vehicle = ford_fiesta();
        vehicle["vin"] = json!(vin);
        vehicle["purchasePrice"] = serde_json::from_str(price).expect("price literal");

        let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(as_json(&body)["purchasePrice"].to_string(), price);

        let (status, body) = send(&app, Method::GET, &format!("/vehicle/{vin}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["purchasePrice"].to_string(), price);
        assert!(String::from_utf8(body).expect("utf-8 body").contains(&format!("\"purchasePrice\":{price}")));
    }
}

#[tokio::test]
async fn test_create_with_negative_price_is_rejected() {
    let (app, repository) = create_test_app();
    let vehicle = json!({ "vin": "V123", "purchasePrice": -100 });

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = as_json(&body);
    assert_eq!(errors["purchasePrice"], "Price cannot be negative");
    assert_eq!(errors["manufacturerName"], "Manufacturer name is required");
    assert_eq!(errors["fuelType"], "Fuel type is required");
    assert!(errors.get("vin").is_none());
    assert!(repository.find_all().await.expect("list works").is_empty());
}

#[tokio::test]
async fn test_create_without_price_is_rejected() {
    let (app, repository) = create_test_app();
    let mut vehicle = ford_fiesta();
    vehicle.as_object_mut().expect("object").remove("purchasePrice");

    let (status, body) = send(&app, Method::POST, "/vehicle", Some(&vehicle)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(as_json(&body), json!({ "purchasePrice": "Purchase price is required" }));
    assert!(!repository.exists("V1").await.expect("lookup works"));
}

#[tokio::test]
async fn test_unparsable_bodies_are_bad_requests() {
    let (app, repository) = create_test_app();

    let status = send_raw(&app, Method::POST, "/vehicle", Some("application/json"), "{\"vin\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = send_raw(
        &app,
        Method::POST,
        "/vehicle",
        Some("application/json"),
        r#"{"vin":"V1","fuelType":"PETROL"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = send_raw(&app, Method::POST, "/vehicle", None, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = send_raw(&app, Method::PUT, "/vehicle/V1", Some("application/json"), "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(repository.find_all().await.expect("list works").is_empty());
}

#[tokio::test]
async fn test_update_existing_vehicle() {
    let (app, _) = create_test_app();
    send(&app, Method::POST, "/vehicle", Some(&ford_fiesta())).await;

    let changes = json!({
        "vin": "SOMETHING-ELSE",
        "manufacturerName": "Ford",
        "description": "Facelift",
        "horsePower": 125,
        "modelName": "Focus",
        "purchasePrice": 23500.5,
        "fuelType": "HYBRID"
    });

    let (status, body) = send(&app, Method::PUT, "/vehicle/V1", Some(&changes)).await;
    assert_eq!(status, StatusCode::OK);

    let updated = as_json(&body);
    assert_eq!(updated["vin"], "V1");
    assert_eq!(updated["description"], "Facelift");
    assert_eq!(updated["horsePower"], 125);
    assert_eq!(updated["modelName"], "Focus");
    assert_eq!(updated["purchasePrice"].as_f64(), Some(23500.5));
    assert_eq!(updated["fuelType"], "HYBRID");

    let (status, _) = send(&app, Method::GET, "/vehicle/SOMETHING-ELSE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/vehicle/V1", None).await;
    assert_eq!(as_json(&body), updated);
}

#[tokio::test]
async fn test_update_missing_vehicle_is_not_found() {
    let (app, repository) = create_test_app();

    let (status, body) = send(&app, Method::PUT, "/vehicle/V1", Some(&ford_fiesta())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert!(repository.find_all().await.expect("list works").is_empty());
}

#[tokio::test]
async fn test_update_is_validated_before_lookup() {
    let (app, _) = create_test_app();
    let mut invalid = ford_fiesta();
    invalid["modelName"] = json!("   ");

    let (status, body) = send(&app, Method::PUT, "/vehicle/UNKNOWN", Some(&invalid)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(as_json(&body), json!({ "modelName": "Model name is required" }));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, _) = create_test_app();

    let (first, _) = send(&app, Method::DELETE, "/vehicle/V123", None).await;
    let (second, _) = send(&app, Method::DELETE, "/vehicle/V123", None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "vehicle-service");
}
