use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use crate::controllers::auth_controller::AuthController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, ResetChallengeResponse, ResetPasswordRequest, SignupRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/reset/challenge", get(reset_challenge))
        .route("/reset", post(reset_password))
        .merge(protected)
}

async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.signup(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.logout(&user).await?;
    Ok(Json(response))
}

async fn reset_challenge(State(state): State<AppState>) -> Json<ResetChallengeResponse> {
    let controller = AuthController::new(state);
    Json(controller.reset_challenge().await)
}

async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.reset_password(request).await?;
    Ok(Json(response))
}
