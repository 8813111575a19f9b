//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.

pub mod vehicle_service;

pub use vehicle_service::VehicleService;
