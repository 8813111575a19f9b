//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Mensaje de conflicto cuando el VIN ya está registrado
pub const VIN_ALREADY_EXISTS: &str = "VIN already exists";

/// Mensaje devuelto cuando el body no se puede parsear
pub const MALFORMED_JSON: &str = "Malformed JSON request";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Convierte los errores de validación en `{ "<campo>": "<mensaje>" }`
fn field_error_body(errors: &validator::ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .first()
                .and_then(|error| error.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field.to_string(), Value::String(message))
        })
        .collect();

    Value::Object(fields)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Database(e) => {
                tracing::error!("❌ Error de base de datos: {}", e);
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Error interno: {}", msg);
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }

            AppError::Validation(errors) => {
                tracing::debug!("⚠️ Validación fallida: {}", errors);
                (status, Json(field_error_body(&errors))).into_response()
            }

            AppError::MalformedRequest(reason) => {
                tracing::debug!("⚠️ Body no legible: {}", reason);
                (status, Json(json!({ "error": MALFORMED_JSON }))).into_response()
            }

            AppError::Conflict(msg) => {
                tracing::warn!("⚠️ Conflicto: {}", msg);
                (status, Json(json!({ "error": msg }))).into_response()
            }

            AppError::NotFound(msg) => {
                tracing::debug!("🔍 Recurso no encontrado: {}", msg);
                status.into_response()
            }
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para el conflicto de VIN duplicado
pub fn vin_conflict_error() -> AppError {
    AppError::Conflict(VIN_ALREADY_EXISTS.to_string())
}
