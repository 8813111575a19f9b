//! Servicio de vehículos
//!
//! Lógica de negocio entre las rutas HTTP y el repositorio:
//! unicidad del VIN al crear y sobrescritura completa al actualizar.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{vin_conflict_error, AppError, AppResult};

#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    /// Crea un vehículo. Falla con `Conflict` si el VIN ya existe.
    ///
    /// La comprobación previa no es atómica; el `insert` del repositorio
    /// también devuelve `Conflict` si otra petición ganó la carrera.
    pub async fn create_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        if self.repository.exists(&vehicle.vin).await? {
            warn!("⚠️ VIN duplicado: {}", vehicle.vin);
            return Err(vin_conflict_error());
        }

        let created = self.repository.insert(vehicle).await.map_err(|e| {
            if let AppError::Conflict(_) = &e {
                warn!("⚠️ VIN duplicado detectado por la base de datos");
            }
            e
        })?;

        info!("✅ Vehículo creado: {}", created.vin);
        Ok(created)
    }

    /// Sobrescribe todos los campos salvo el VIN. `None` si el VIN no existe.
    pub async fn update_vehicle(&self, vin: &str, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let Some(mut existing) = self.repository.find_by_id(vin).await? else {
            debug!("🔍 Vehículo {} no encontrado para actualizar", vin);
            return Ok(None);
        };

        existing.overwrite_with(vehicle);
        let updated = self.repository.save(existing).await?;

        info!("✅ Vehículo actualizado: {}", updated.vin);
        Ok(Some(updated))
    }

    pub async fn get_all_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.repository.find_all().await?;
        debug!("📋 {} vehículos encontrados", vehicles.len());
        Ok(vehicles)
    }

    pub async fn get_vehicle_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        self.repository.find_by_id(vin).await
    }

    /// Borra sin comprobar existencia; es idempotente.
    pub async fn delete_vehicle(&self, vin: &str) -> AppResult<()> {
        self.repository.delete_by_id(vin).await?;
        info!("🗑️ Vehículo eliminado: {}", vin);
        Ok(())
    }
}
