//! Modelo de ServiceRecord
//!
//! Odómetro al que se hizo por última vez una tarea. Como mucho un registro
//! por (user_id, vehicle_name, task_name); se actualiza, nunca se duplica.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub vehicle_name: String,
    pub task_name: String,
    pub last_service_odo_km: i64,
    pub serviced_at: DateTime<Utc>,
}
