//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos.
//! Cada helper devuelve el valor validado o un `ValidationError` con
//! el mensaje que se expone al cliente.

use std::borrow::Cow;

use num_traits::Zero;
use serde::Serialize;
use validator::ValidationError;

/// Crear un error de validación con código y mensaje
pub fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validar que un valor opcional esté presente
pub fn validate_required<T>(value: Option<T>, message: &'static str) -> Result<T, ValidationError> {
    value.ok_or_else(|| field_error("required", message))
}

/// Validar que un string esté presente y no esté en blanco
pub fn validate_not_blank(value: Option<String>, message: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(field_error("not_blank", message)),
    }
}

/// Validar que un valor sea mayor o igual a `min`
pub fn validate_min<T: PartialOrd + Serialize>(
    value: T,
    min: T,
    message: &'static str,
) -> Result<T, ValidationError> {
    if value < min {
        let mut error = field_error("min", message);
        error.add_param("min".into(), &min);
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(value)
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + Zero + Serialize>(
    value: T,
    message: &'static str,
) -> Result<T, ValidationError> {
    if value < T::zero() {
        let mut error = field_error("non_negative", message);
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(value)
}
