use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::profile_dto::UpdateProfileRequest;
use crate::models::user::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct ProfileController {
    repository: UserRepository,
}

impl ProfileController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        let request = request.trimmed();
        request.validate()?;

        let mobile = request.mobile.as_str();
        let email = request.email.as_str();

        // móvil y email no pueden pertenecer a otro usuario
        if self.repository.mobile_exists(mobile, Some(user_id)).await? {
            return Err(AppError::Conflict("Mobile number already in use".to_string()));
        }

        if self.repository.email_exists(email, Some(user_id)).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let user = self
            .repository
            .update_profile(user_id, &request.name, mobile, email)
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Profile updated successfully",
        ))
    }
}
