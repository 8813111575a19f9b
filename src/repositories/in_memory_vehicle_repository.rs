//! Repositorio de vehículos en memoria
//!
//! Misma semántica que `PgVehicleRepository`, sin base de datos.
//! Se usa en tests y con `STORAGE_BACKEND=memory`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{vin_conflict_error, AppResult};

#[derive(Clone, Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<RwLock<BTreeMap<String, Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn exists(&self, vin: &str) -> AppResult<bool> {
        Ok(self.vehicles.read().await.contains_key(vin))
    }

    async fn find_by_id(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.get(vin).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().await.values().cloned().collect())
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.contains_key(&vehicle.vin) {
            return Err(vin_conflict_error());
        }
        vehicles.insert(vehicle.vin.clone(), vehicle.clone());
        Ok(vehicle)
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        self.vehicles
            .write()
            .await
            .insert(vehicle.vin.clone(), vehicle.clone());
        Ok(vehicle)
    }

    async fn delete_by_id(&self, vin: &str) -> AppResult<()> {
        self.vehicles.write().await.remove(vin);
        Ok(())
    }
}
