use bcrypt::{hash, verify};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, ResetChallengeResponse, ResetPasswordRequest, SignupRequest,
};
use crate::models::user::{User, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::utils::jwt::generate_token;

pub struct AuthController {
    repository: UserRepository,
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self {
            repository: UserRepository::new(state.pool.clone()),
            state,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<ApiResponse<UserResponse>, AppError> {
        let request = request.trimmed();
        request.validate()?;

        let SignupRequest { name, mobile, email, password } = request;

        if self.repository.mobile_exists(&mobile, None).await? {
            return Err(AppError::Conflict("Mobile number already registered".to_string()));
        }

        if self.repository.email_exists(&email, None).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash(&password, self.state.config.bcrypt_cost)?;

        let user = User::new(name, mobile, email, password_hash);
        let saved = self.repository.create(&user).await?;

        tracing::info!("👤 Usuario registrado: {}", saved.id);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(saved),
            "Account created successfully",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_identifier(request.identifier.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        if !verify(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Wrong password".to_string()));
        }

        let jwt_config = self.state.jwt_config();
        let token = generate_token(user.id, &user.email, &jwt_config)?;

        tracing::info!("🔓 Login correcto para {}", user.id);

        Ok(LoginResponse::success(token, jwt_config.expiration, user.id, user.name))
    }

    /// Revocar el token con el que se hizo la petición
    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<ApiResponse<()>, AppError> {
        self.state
            .revoke_token(user.token_id.clone(), user.expires_at)
            .await;
        tracing::info!("🔒 Logout de {} ({})", user.email, user.user_id);

        Ok(ApiResponse::message("Logged out"))
    }

    pub async fn reset_challenge(&self) -> ResetChallengeResponse {
        let (challenge_id, challenge) = self.state.issue_reset_challenge().await;

        ResetChallengeResponse {
            challenge_id,
            question: challenge.question,
            expires_in: self.state.config.reset_challenge_ttl,
        }
    }

    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        // el desafío se consume aunque la respuesta sea incorrecta
        let challenge = self.state.take_reset_challenge(request.challenge_id).await;
        let answer_ok = match (&challenge, request.answer.trim().parse::<i64>()) {
            (Some(challenge), Ok(answer)) => challenge.answer == answer,
            _ => false,
        };

        let user = self.repository.find_by_email(request.email.trim()).await?;

        match user {
            Some(user) if answer_ok => {
                let password_hash = hash(&request.new_password, self.state.config.bcrypt_cost)?;
                self.repository.update_password(user.id, &password_hash).await?;
                tracing::info!("🔑 Contraseña restablecida para {}", user.id);
                Ok(ApiResponse::message("Password reset successfully"))
            }
            _ => Err(AppError::BadRequest("Invalid email or incorrect answer".to_string())),
        }
    }
}
