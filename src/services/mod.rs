//! Services module
//!
//! Lógica de negocio pura, independiente de HTTP y de la base de datos.

pub mod maintenance_evaluator;

pub use maintenance_evaluator::*;
