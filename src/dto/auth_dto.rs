use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::MOBILE_NUMBER;

// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 150, message = "Full name is required"))]
    pub name: String,

    #[validate(regex(path = "MOBILE_NUMBER", message = "Mobile number must be 10 digits"))]
    pub mobile: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl SignupRequest {
    /// Quitar espacios antes de validar: un nombre en blanco no pasa
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

// Login por email o por móvil
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email or mobile number is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: Uuid,
    pub name: String,
}

impl LoginResponse {
    pub fn success(token: String, expires_in: u64, user_id: Uuid, name: String) -> Self {
        Self {
            success: true,
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user_id,
            name,
        }
    }
}

// Pregunta para recuperar contraseña
#[derive(Debug, Serialize)]
pub struct ResetChallengeResponse {
    pub challenge_id: Uuid,
    pub question: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub challenge_id: Uuid,

    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}
