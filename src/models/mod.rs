//! Modelos del sistema
//!
//! Este módulo contiene los modelos que mapean al schema SQLite y el
//! catálogo de mantenimiento.

pub mod catalog;
pub mod service_record;
pub mod user;
pub mod user_vehicle;

pub use catalog::{CatalogError, MaintenanceTask, VehicleCatalog, VehicleCatalogEntry};
pub use service_record::ServiceRecord;
pub use user::{User, UserResponse};
pub use user_vehicle::UserVehicle;
