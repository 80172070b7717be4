//! DTOs de la API
//!
//! Requests y responses JSON de cada grupo de rutas.

pub mod api_response;
pub mod auth_dto;
pub mod maintenance_dto;
pub mod profile_dto;

pub use api_response::ApiResponse;
