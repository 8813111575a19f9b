//! Vehicle Service
//!
//! Servicio HTTP CRUD para vehículos indexados por VIN.
//! Capas: rutas HTTP → validación → servicio → repositorio.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
