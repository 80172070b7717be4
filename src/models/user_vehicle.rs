//! Modelo de UserVehicle
//!
//! Un vehículo del catálogo seleccionado por un usuario, con su última
//! lectura de odómetro. Único por (user_id, vehicle_name).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserVehicle {
    pub id: i64,
    pub user_id: Uuid,
    pub vehicle_name: String,
    pub odometer_km: i64,
    pub updated_at: DateTime<Utc>,
}
