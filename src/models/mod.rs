//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio que mapean
//! al schema PostgreSQL.

pub mod vehicle;
