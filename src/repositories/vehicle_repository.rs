use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::vehicle::{FuelType, Vehicle};
use crate::utils::errors::{vin_conflict_error, AppError, AppResult};

/// Código SQLSTATE de PostgreSQL para `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Acceso al almacenamiento de vehículos, indexado por VIN
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn exists(&self, vin: &str) -> AppResult<bool>;

    async fn find_by_id(&self, vin: &str) -> AppResult<Option<Vehicle>>;

    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    /// Inserción estricta. Un VIN duplicado devuelve `AppError::Conflict`.
    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Inserta si el VIN no existe, si no sobrescribe el registro.
    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// No-op si el VIN no existe.
    async fn delete_by_id(&self, vin: &str) -> AppResult<()>;
}

// Fila tal como sale de la tabla vehicles
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    vin: String,
    manufacturer_name: String,
    description: String,
    horse_power: Option<i32>,
    model_name: String,
    purchase_price: Decimal,
    fuel_type: String,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let fuel_type = row
            .fuel_type
            .parse::<FuelType>()
            .map_err(|e| AppError::Internal(format!("Vehicle '{}': {}", row.vin, e)))?;

        Ok(Vehicle {
            vin: row.vin,
            manufacturer_name: row.manufacturer_name,
            description: row.description,
            horse_power: row.horse_power,
            model_name: row.model_name,
            purchase_price: row.purchase_price,
            fuel_type,
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn exists(&self, vin: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn find_by_id(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type
            FROM vehicles
            WHERE vin = $1
            "#,
        )
        .bind(vin)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type
            FROM vehicles
            ORDER BY vin
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type
            "#,
        )
        .bind(&vehicle.vin)
        .bind(&vehicle.manufacturer_name)
        .bind(&vehicle.description)
        .bind(vehicle.horse_power)
        .bind(&vehicle.model_name)
        .bind(vehicle.purchase_price)
        .bind(vehicle.fuel_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                vin_conflict_error()
            } else {
                AppError::Database(e)
            }
        })?;

        Vehicle::try_from(row)
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (vin) DO UPDATE
            SET manufacturer_name = EXCLUDED.manufacturer_name,
                description = EXCLUDED.description,
                horse_power = EXCLUDED.horse_power,
                model_name = EXCLUDED.model_name,
                purchase_price = EXCLUDED.purchase_price,
                fuel_type = EXCLUDED.fuel_type
            RETURNING vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type
            "#,
        )
        .bind(&vehicle.vin)
        .bind(&vehicle.manufacturer_name)
        .bind(&vehicle.description)
        .bind(vehicle.horse_power)
        .bind(&vehicle.model_name)
        .bind(vehicle.purchase_price)
        .bind(vehicle.fuel_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Vehicle::try_from(row)
    }

    async fn delete_by_id(&self, vin: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM vehicles WHERE vin = $1")
            .bind(vin)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
