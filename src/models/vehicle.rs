//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el enum FuelType.
//! Mapea a la tabla `vehicles` de PostgreSQL con primary key `vin`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tipo de combustible - se serializa con el nombre del enum (`GASOLINE`, ...)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    /// Nombre tal como se guarda en la columna `fuel_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINE",
            FuelType::Diesel => "DIESEL",
            FuelType::Electric => "ELECTRIC",
            FuelType::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel type '{0}'")]
pub struct UnknownFuelType(pub String);

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|fuel_type| fuel_type.as_str() == value)
            .ok_or_else(|| UnknownFuelType(value.to_string()))
    }
}

/// Vehicle principal - la representación JSON usa camelCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    /// Opcional; si viene, debe ser >= 1
    pub horse_power: Option<i32>,
    pub model_name: String,
    /// Número JSON con todos sus dígitos, sin pasar por f64
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub purchase_price: Decimal,
    pub fuel_type: FuelType,
}

impl Vehicle {
    /// Copia todos los campos mutables de `other` sobre `self`. El VIN nunca cambia.
    pub fn overwrite_with(&mut self, other: Vehicle) {
        self.manufacturer_name = other.manufacturer_name;
        self.description = other.description;
        self.horse_power = other.horse_power;
        self.model_name = other.model_name;
        self.purchase_price = other.purchase_price;
        self.fuel_type = other.fuel_type;
    }
}
