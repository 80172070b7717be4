//! Repositorios
//!
//! Acceso a las tablas SQLite. Cada repositorio es dueño de un clon del pool.

pub mod service_record_repository;
pub mod user_repository;
pub mod user_vehicle_repository;

pub use service_record_repository::ServiceRecordRepository;
pub use user_repository::UserRepository;
pub use user_vehicle_repository::UserVehicleRepository;
