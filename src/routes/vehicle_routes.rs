use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::vehicle_dto::VehiclePayload;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicle/:vin",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.vehicle_service.get_all_vehicles().await?;
    Ok(Json(vehicles))
}

async fn create_vehicle(
    State(state): State<AppState>,
    VehiclePayload(vehicle): VehiclePayload,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    let created = state.vehicle_service.create_vehicle(vehicle).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<Json<Vehicle>> {
    state
        .vehicle_service
        .get_vehicle_by_vin(&vin)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Vehicle", &vin))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    VehiclePayload(vehicle): VehiclePayload,
) -> AppResult<Json<Vehicle>> {
    state
        .vehicle_service
        .update_vehicle(&vin, vehicle)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Vehicle", &vin))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> AppResult<StatusCode> {
    state.vehicle_service.delete_vehicle(&vin).await?;
    Ok(StatusCode::NO_CONTENT)
}
