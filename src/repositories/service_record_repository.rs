use crate::models::service_record::ServiceRecord;
use crate::services::maintenance_evaluator::{ServiceHistory, ServiceRecordSource};
use crate::utils::errors::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct ServiceRecordRepository {
    pool: SqlitePool,
}

impl ServiceRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Crear el registro o mover su odómetro si ya existía
    pub async fn upsert(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
        task_name: &str,
        odometer_km: i64,
    ) -> Result<ServiceRecord, AppError> {
        let record = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO service_records (user_id, vehicle_name, task_name, last_service_odo_km, serviced_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, vehicle_name, task_name)
            DO UPDATE SET last_service_odo_km = excluded.last_service_odo_km,
                          serviced_at = excluded.serviced_at
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(vehicle_name)
        .bind(task_name)
        .bind(odometer_km)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error saving service record: {}", e)))?;

        Ok(record)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ServiceRecord>, AppError> {
        let records = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE user_id = ? ORDER BY vehicle_name, task_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing service records: {}", e)))?;

        Ok(records)
    }

    pub async fn find_by_vehicle(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
    ) -> Result<Vec<ServiceRecord>, AppError> {
        let records = sqlx::query_as::<_, ServiceRecord>(
            "SELECT * FROM service_records WHERE user_id = ? AND vehicle_name = ? ORDER BY task_name",
        )
        .bind(user_id)
        .bind(vehicle_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing service records: {}", e)))?;

        Ok(records)
    }
}

#[async_trait]
impl ServiceRecordSource for ServiceRecordRepository {
    async fn get_service_records(
        &self,
        user_id: Uuid,
        vehicle_name: &str,
    ) -> Result<ServiceHistory, AppError> {
        let records = self.find_by_vehicle(user_id, vehicle_name).await?;
        Ok(records
            .into_iter()
            .map(|r| (r.task_name, r.last_service_odo_km))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConnection;
    use crate::models::user::User;
    use crate::repositories::user_repository::UserRepository;

    async fn setup() -> (ServiceRecordRepository, Uuid) {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let user = User::new(
            "Asha".to_string(),
            "9876543210".to_string(),
            "asha@example.com".to_string(),
            "hash".to_string(),
        );
        UserRepository::new(db.pool().clone()).create(&user).await.unwrap();
        (ServiceRecordRepository::new(db.pool().clone()), user.id)
    }

    #[tokio::test]
    async fn test_upsert_never_duplicates() {
        let (repo, user_id) = setup().await;

        let first = repo.upsert(user_id, "Bike_01", "Oil Change", 5000).await.unwrap();
        let second = repo.upsert(user_id, "Bike_01", "Oil Change", 10200).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.last_service_odo_km, 10200);
        assert_eq!(repo.find_by_user(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_service_history_is_scoped_to_vehicle() {
        let (repo, user_id) = setup().await;

        repo.upsert(user_id, "Bike_01", "Oil Change", 5000).await.unwrap();
        repo.upsert(user_id, "Car_01", "Oil Change", 20000).await.unwrap();

        let history = repo.get_service_records(user_id, "Bike_01").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get("Oil Change"), Some(&5000));
        assert!(repo
            .get_service_records(user_id, "Bike_02")
            .await
            .unwrap()
            .is_empty());
    }
}
