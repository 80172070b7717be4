use crate::models::user::User;
use crate::utils::errors::{is_unique_violation, AppError};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, mobile, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.mobile)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Mobile number or email already registered".to_string())
            } else {
                AppError::Database(format!("Error creating user: {}", e))
            }
        })?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding user: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding user by email: {}", e)))?;

        Ok(result)
    }

    /// Buscar por email o por número móvil
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = ? OR mobile = ? LIMIT 1",
        )
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding user by identifier: {}", e)))?;

        Ok(result)
    }

    /// `exclude` permite ignorar al propio usuario al editar su perfil
    pub async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND (? IS NULL OR id != ?))",
        )
        .bind(email)
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking email: {}", e)))?;

        Ok(result.0 != 0)
    }

    pub async fn mobile_exists(&self, mobile: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE mobile = ? AND (? IS NULL OR id != ?))",
        )
        .bind(mobile)
        .bind(exclude)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking mobile: {}", e)))?;

        Ok(result.0 != 0)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        mobile: &str,
        email: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = ?, mobile = ?, email = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(mobile)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Mobile number or email already in use".to_string())
            } else {
                AppError::Database(format!("Error updating user: {}", e))
            }
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(result)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error updating password: {}", e)))?;

        Ok(())
    }
}
