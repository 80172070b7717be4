use crate::models::user_vehicle::UserVehicle;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

pub struct UserVehicleRepository {
    pool: SqlitePool,
}

impl UserVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Transacción para aplicar varias escrituras de una vez
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))
    }

    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        user_id: Uuid,
        vehicle_name: &str,
        odometer_km: i64,
    ) -> Result<UserVehicle, AppError> {
        let vehicle = sqlx::query_as::<_, UserVehicle>(
            r#"
            INSERT INTO user_vehicles (user_id, vehicle_name, odometer_km, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(vehicle_name)
        .bind(odometer_km)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::Database(format!("Error creating user vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<UserVehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, UserVehicle>(
            "SELECT * FROM user_vehicles WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing user vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn find(&self, user_id: Uuid, vehicle_name: &str) -> Result<Option<UserVehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, UserVehicle>(
            "SELECT * FROM user_vehicles WHERE user_id = ? AND vehicle_name = ?",
        )
        .bind(user_id)
        .bind(vehicle_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding user vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn update_odometer(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        odometer_km: i64,
    ) -> Result<UserVehicle, AppError> {
        let vehicle = sqlx::query_as::<_, UserVehicle>(
            r#"
            UPDATE user_vehicles
            SET odometer_km = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(odometer_km)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::Database(format!("Error updating odometer: {}", e)))?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_vehicles WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting user vehicle: {}", e)))?;

        Ok(())
    }
}
