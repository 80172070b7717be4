//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt_config())?;

    if state.is_token_revoked(&claims.jti).await {
        return Err(AppError::Unauthorized("Token has been revoked".to_string()));
    }

    // Verificar que el usuario sigue existiendo
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        token_id: claims.jti.clone(),
        expires_at: claims.expires_at(),
    };

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
