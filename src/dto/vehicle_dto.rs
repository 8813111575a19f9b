use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

use crate::models::vehicle::{FuelType, Vehicle};
use crate::utils::errors::AppError;
use crate::utils::validation::{
    validate_min, validate_non_negative, validate_not_blank, validate_required,
};

pub const VIN_REQUIRED: &str = "VIN is required";
pub const MANUFACTURER_NAME_REQUIRED: &str = "Manufacturer name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const HORSE_POWER_MIN: &str = "Horsepower must be greater than 0";
pub const MODEL_NAME_REQUIRED: &str = "Model name is required";
pub const PURCHASE_PRICE_REQUIRED: &str = "Purchase price is required";
pub const PURCHASE_PRICE_NEGATIVE: &str = "Price cannot be negative";
pub const FUEL_TYPE_REQUIRED: &str = "Fuel type is required";

// Body de POST /vehicle y PUT /vehicle/{vin}, todavía sin validar
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub vin: Option<String>,
    pub manufacturer_name: Option<String>,
    pub description: Option<String>,
    pub horse_power: Option<i32>,
    pub model_name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub purchase_price: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.add(field, error);
            None
        }
    }
}

impl VehicleRequest {
    /// Valida todos los campos y construye el Vehicle.
    /// Se reportan todos los campos inválidos, no sólo el primero.
    pub fn into_vehicle(self) -> Result<Vehicle, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let vin = collect(&mut errors, "vin", validate_not_blank(self.vin, VIN_REQUIRED));
        let manufacturer_name = collect(
            &mut errors,
            "manufacturerName",
            validate_not_blank(self.manufacturer_name, MANUFACTURER_NAME_REQUIRED),
        );
        let description = collect(
            &mut errors,
            "description",
            validate_not_blank(self.description, DESCRIPTION_REQUIRED),
        );
        let horse_power = collect(
            &mut errors,
            "horsePower",
            self.horse_power
                .map(|value| validate_min(value, 1, HORSE_POWER_MIN))
                .transpose(),
        );
        let model_name = collect(
            &mut errors,
            "modelName",
            validate_not_blank(self.model_name, MODEL_NAME_REQUIRED),
        );
        let purchase_price = collect(
            &mut errors,
            "purchasePrice",
            validate_required(self.purchase_price, PURCHASE_PRICE_REQUIRED)
                .and_then(|value| validate_non_negative(value, PURCHASE_PRICE_NEGATIVE)),
        );
        let fuel_type = collect(
            &mut errors,
            "fuelType",
            validate_required(self.fuel_type, FUEL_TYPE_REQUIRED),
        );

        match (vin, manufacturer_name, description, horse_power, model_name, purchase_price, fuel_type) {
            (
                Some(vin),
                Some(manufacturer_name),
                Some(description),
                Some(horse_power),
                Some(model_name),
                Some(purchase_price),
                Some(fuel_type),
            ) => Ok(Vehicle {
                vin,
                manufacturer_name,
                description,
                horse_power,
                model_name,
                purchase_price,
                fuel_type,
            }),
            _ => Err(errors),
        }
    }
}

/// Extractor de body JSON ya validado.
///
/// El parseo se evalúa antes que la validación: un body ilegible produce
/// `MalformedRequest` (400) aunque además le falten campos.
#[derive(Debug)]
pub struct VehiclePayload(pub Vehicle);

#[async_trait]
impl<S> FromRequest<S> for VehiclePayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(request) = Json::<VehicleRequest>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;

        let vehicle = request.into_vehicle()?;
        Ok(Self(vehicle))
    }
}
