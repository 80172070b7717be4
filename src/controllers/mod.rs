//! Controladores
//!
//! Cada controlador agrupa los repositorios que necesita un grupo de
//! endpoints y se construye por request a partir del estado compartido.

pub mod auth_controller;
pub mod maintenance_controller;
pub mod profile_controller;

pub use auth_controller::AuthController;
pub use maintenance_controller::MaintenanceController;
pub use profile_controller::ProfileController;
